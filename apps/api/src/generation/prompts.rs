// Prompt text for cover letter generation.

use crate::application::models::DEFAULT_RECIPIENT;

/// Cover letter prompt template.
/// Replace: {job_title}, {company_name}, {recipient_name}, {job_description}, {platform}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"This is a candidate's CV in PDF format. Extract the text considering layouts, headings and subheadings.
Then write a professional cover letter of 250-330 words based on this CV and the following details:
- Job Title: {job_title}
- Company: {company_name}
- Recipient's Name: {recipient_name}
- Job Description: {job_description}
- Platform of the Advertisement: {platform}

Please ensure the cover letter is tailored to the specific role and company. It should:
1. Clearly state the purpose of the letter and introduce the candidate.
2. Demonstrate genuine interest in the job and company.
3. Complement the CV by offering a little more detail about key experiences, not simply repeat the CV in paragraph form.
4. Focus on transferable skills if no direct experience exists.
5. Maintain a professional tone, be concise, and thank the reader for their time and consideration.

Structure:
- Introduction: State why the candidate is interested in the role and company.
- Body: Provide 2-3 key examples from the CV that show how the candidate's skills and experience align with the role.
- Closing: Reaffirm the candidate's interest and gratitude for the opportunity.

Be sure to personalize the letter and avoid generic language. The body paragraphs must be equal in size.
"#;

/// Builds the generation prompt. Pure string interpolation.
///
/// A blank `recipient_name` falls back to "Hiring Manager".
pub fn build_prompt(
    job_title: &str,
    company_name: &str,
    job_description: &str,
    platform: &str,
    recipient_name: &str,
) -> String {
    let recipient_name = match recipient_name.trim() {
        "" => DEFAULT_RECIPIENT,
        name => name,
    };

    // Single pass over the template so placeholder-looking text inside user
    // input is never substituted a second time.
    let mut prompt = String::with_capacity(
        COVER_LETTER_PROMPT_TEMPLATE.len() + job_description.len() + 256,
    );
    let mut rest = COVER_LETTER_PROMPT_TEMPLATE;
    while let Some(start) = rest.find('{') {
        prompt.push_str(&rest[..start]);
        let after = &rest[start..];
        let Some(end) = after.find('}') else {
            prompt.push_str(after);
            rest = "";
            break;
        };
        let value = match &after[1..end] {
            "job_title" => job_title,
            "company_name" => company_name,
            "recipient_name" => recipient_name,
            "job_description" => job_description,
            "platform" => platform,
            _ => &after[..=end],
        };
        prompt.push_str(value);
        rest = &after[end + 1..];
    }
    prompt.push_str(rest);
    prompt
}
