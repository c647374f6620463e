//! Application layer - the document converter and the command/query handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

mod converter;
pub mod handlers;

pub use converter::{DocumentConverter, ExportCapabilities};
pub use handlers::{
    DeleteLessonPlanHandler, ExportDraftHandler, ExportLessonPlanHandler,
    GenerateLessonPlanCommand, GenerateLessonPlanHandler, GenerateStudyMaterialsHandler,
    ListLessonPlansHandler, LoginCommand, LoginHandler, LoginResult, RegenerateLessonPlanHandler,
    SaveLessonPlanCommand, SaveLessonPlanHandler, SignupCommand, SignupHandler, StudyMaterials,
};
