//! Task prompts for a language model
//!
//! Two layouts: the task alone, or the task followed by the summary
//! document as context and instructions to ground the answer in it.
//! Rendering only; sending the prompt anywhere is up to the caller.

use crate::errors::Result;
use crate::features::export::SummaryDocument;

const DEFAULT_FIELD: &str = "math education";

/// Render the prompt for `task`, embedding `context` when given.
pub fn render_prompt(task: &str, context: Option<&SummaryDocument>) -> Result<String> {
    let task = task.trim();
    let Some(doc) = context else {
        return Ok(format!(
            "You are an expert in the field of {DEFAULT_FIELD}.\n\
             Here is what I want you to do: {task}\n"
        ));
    };

    let graph = serde_json::to_string_pretty(doc)?;
    Ok(format!(
        "Here is the task at hand:\n\
         \n\
         {task}\n\
         \n\
         Here is a knowledge graph in JSON format that represents concepts and their relationships.\n\
         {graph}\n\
         \n\
         First, find the most relevant concept or skill to the task at hand.\n\
         Then, find that concept or skill's closest neighbors, parents, or children.\n\
         Finally, answer the task at hand.\n\
         Limit yourself to terminology used in the knowledge graph.\n"
    ))
}
