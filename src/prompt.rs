/// Instruction placed in front of every document sent for summarization.
pub const SUMMARY_INSTRUCTION: &str = "Summarize the following text in two sentences:";

/// Joins the fixed instruction and the document text into one user prompt.
pub fn build_summary_prompt(document: &str) -> String {
    format!("{SUMMARY_INSTRUCTION}\n{document}")
}
