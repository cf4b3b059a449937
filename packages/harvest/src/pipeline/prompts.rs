//! LLM prompts for listing structuring.

/// System message for every structuring call.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that extracts specific information from job listings.";

/// Instruction prompt describing the exact target schema.
///
/// `{title}` and `{details}` are substituted by
/// [`format_structure_prompt`].
pub const STRUCTURE_PROMPT: &str = r#"Analyze the following job listing title and details. Extract the requested information following the format and instructions carefully, then return the result as a JSON object.

Job title: {title}
Job listing details:
{details}

Follow these instructions for each field:

1. University or company name:
Extract the full name

2. Department that is hiring:
Extract the full department name

3. Position they are hiring:
Choose one or more appropriate options, separated by commas: Postdoc, Assistant Professor, Associate Professor, Full Professor, Lecturer

4. Submission deadline:
Format as YYYY-MM-DD. If not specified, write "Not specified"

5. Hiring areas:
List the main areas, prioritizing and choosing from: Security, Software Engineering, Programming Languages, AI, Machine Learning, Data Science, Theory, Systems, Networks, Human-Computer Interaction, Graphics, Robotics. If general or not specified, write "All areas"

6. Number of recommendation letters required:
Provide the number only. If not specified, write "Not specified"

7. Number of positions:
Provide the number only. If not specified, write "Not specified"

8. Additional important comments:
Summarize any other crucial information

Return a JSON object with the following structure:
{
    "university_name": "Answer for item 1",
    "department": "Answer for item 2",
    "position": "Answer for item 3",
    "submission_deadline": "Answer for item 4",
    "hiring_areas": ["Area 1", "Area 2", ...],
    "recommendation_letters": "Answer for item 6",
    "positions_available": "Answer for item 7",
    "additional_comments": "Answer for item 8"
}

Ensure all fields are present in the JSON, even if the information is not available (use null or appropriate default values in such cases)."#;

/// Fill the structuring prompt with a listing's title and details.
pub fn format_structure_prompt(title: &str, details: &str) -> String {
    STRUCTURE_PROMPT
        .replacen("{title}", title, 1)
        .replacen("{details}", details, 1)
}
