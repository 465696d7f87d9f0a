// Instructions shared by every prompt sent to the model.

/// Keeps the model from inventing experience the applicant does not have.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Use ONLY facts that appear in the resume text provided. \
    Do NOT invent employers, job titles, dates, degrees, certifications, metrics or skills. \
    If the resume does not support a claim, leave it out.";

/// Keeps template residue out of the final letter.
pub const NO_PLACEHOLDER_INSTRUCTION: &str = "\
    CRITICAL: The output must be ready to send as-is. \
    Do NOT use placeholder tokens such as [Your Name], [Company Address], <date>, {position} or XXX. \
    Every name, company and role must be written out in full.";
