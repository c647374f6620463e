//! Prompt templates sent to the completion provider.

use super::{LessonPlan, LessonRequest};

/// How much of a plan's body is quoted into the study-materials prompt.
pub const STUDY_SOURCE_CHAR_LIMIT: usize = 2000;

/// Prompt asking for a complete lesson plan in markdown.
pub fn lesson_plan_prompt(request: &LessonRequest) -> String {
    format!(
        "Generate a detailed lesson plan for the subject of {subject} on the topic of {topic}. \
         This lesson is intended for {grade} students and will last for {duration}. \
         The following are the learning objectives: {objectives}. \
         This is how the user wants the plan to be customized: {customization}. \
         Return the results as Markdown.",
        subject = request.subject(),
        topic = request.topic(),
        grade = request.grade(),
        duration = request.duration(),
        objectives = request.objectives(),
        customization = request.customization().unwrap_or_default(),
    )
}

/// Prompt asking for study notes, a quiz and an answer key derived from a plan.
pub fn study_materials_prompt(plan: &LessonPlan) -> String {
    let request = plan.request();
    let source: String = plan.content().chars().take(STUDY_SOURCE_CHAR_LIMIT).collect();

    format!(
        "Based on the following lesson plan for {subject} - {topic} (Grade/Level: {grade}), generate:\n\
         \n\
         1. **Comprehensive Study Notes** covering key concepts and definitions, important \
         explanations, worked examples, a summary of the main topics and any relevant formulas.\n\
         \n\
         2. **Quiz/Assessment Questions**: 10-15 multiple choice questions with 4 options each, \
         5-7 short answer questions, 2-3 essay questions, and an answer key with explanations.\n\
         \n\
         Format the response in Markdown with these sections:\n\
         - # Study Notes\n\
         - # Quiz Questions\n\
         - # Answer Key\n\
         \n\
         Make it appropriate for {grade} level students.\n\
         \n\
         Lesson Plan Content:\n\
         {source}",
        subject = request.subject(),
        topic = request.topic(),
        grade = request.grade(),
    )
}
