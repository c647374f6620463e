//! Command and query handlers.
//!
//! Each handler owns the ports it needs as `Arc<dyn ...>` and acts on
//! behalf of the `SessionContext` it is handed.

pub mod accounts;
pub mod export;
pub mod lesson;

pub use accounts::{LoginCommand, LoginHandler, LoginResult, SignupCommand, SignupHandler};
pub use export::{ExportDraftHandler, ExportLessonPlanHandler};
pub use lesson::{
    DeleteLessonPlanHandler, GenerateLessonPlanCommand, GenerateLessonPlanHandler,
    GenerateStudyMaterialsHandler, ListLessonPlansHandler, RegenerateLessonPlanHandler,
    SaveLessonPlanCommand, SaveLessonPlanHandler, StudyMaterials,
};
