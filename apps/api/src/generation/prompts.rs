// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Cover letter prompt template.
/// Markers: {grounding_instruction}, {placeholder_instruction}, {resume_text},
///          {user_name}, {user_email}, {user_phone}, {company_name}, {position}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"You are an expert career writer. Write a professional cover letter for the applicant below.

{grounding_instruction}

{placeholder_instruction}

RESUME TEXT (extracted from the applicant's PDF; the ONLY source of facts about the applicant):
{resume_text}

APPLICANT:
Name: {user_name}
Email: {user_email}
Phone: {user_phone}

TARGET ROLE:
Company: {company_name}
Position: {position}

STRUCTURE (in this order, paragraphs separated by one blank line):
1. Opening salutation addressed to the Hiring Manager.
2. Introduction that names the position ({position}) and the company ({company_name}).
3. One or two body paragraphs highlighting skills and experience drawn ONLY from the resume text.
4. A paragraph explaining why the applicant is a good fit for {company_name}.
5. A closing paragraph expressing interest in an interview.
6. A professional sign-off followed by the applicant's name: {user_name}.

HARD RULES:
1. Do NOT include a date anywhere in the letter.
2. Do NOT include a street address for the applicant or the company.
3. Do NOT include placeholder text of any kind.
4. Do NOT add facts, numbers or achievements that are not in the resume text.
5. Return only the letter text: no headings, no markdown, no commentary.

Tone: professional, enthusiastic and specific to both the resume and the company."#;
