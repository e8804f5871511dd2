//! All prompt constants used by the extraction tiers and drafting features.
//! Templates use `{placeholder}` markers replaced before sending.

/// Experience extraction fallback (tier 3). Replace `{resume_text}`.
/// The response is parsed for its first integer token; anything else is
/// treated as unresolved.
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = "\
Extract total years of professional work experience from this resume.
Return only an integer.

{resume_text}";

/// Name extraction fallback (tier 4). Replace `{resume_text}`.
/// The model is instructed to answer with a literal NULL sentinel when
/// uncertain rather than guessing.
pub const NAME_PROMPT_TEMPLATE: &str = "\
Extract the candidate's full name from this resume.
Return only the name, with no other text.
If you cannot find a person's name, return exactly: NULL

{resume_text}";

/// Interview question generation. Replace `{jd_summary}` and `{resume_summary}`.
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = "\
You are a senior technical interviewer.

Job Description:
{jd_summary}

Candidate Profile:
{resume_summary}

Generate 5 targeted interview questions. Mix technical and behavioral. \
Keep each question concise.";

/// Executive evaluation summary. Replace `{jd_summary}` and `{resume_summary}`.
pub const EXECUTIVE_SUMMARY_PROMPT_TEMPLATE: &str = "\
Job Description:
{jd_summary}

Candidate Profile:
{resume_summary}

Provide a concise executive evaluation summary (5-6 sentences). \
Highlight strengths, risks, and hiring recommendation.";

/// JD drafting. Replace `{title}`, `{department}`, `{seniority}`, `{requirements}`.
pub const JD_GENERATE_PROMPT_TEMPLATE: &str = "\
Generate a professional job description.

Title: {title}
Department: {department}
Seniority: {seniority}
Key Requirements: {requirements}

Include:
- Responsibilities
- Required Qualifications
- Preferred Qualifications
- Benefits
- Equal Opportunity statement";

/// JD improvement pass applied to a drafted or pasted JD. Replace `{jd_text}`.
pub const JD_IMPROVE_PROMPT_TEMPLATE: &str = "Improve this JD:\n\n{jd_text}";

/// JD review for inclusivity, clarity, and keyword strength. Replace `{jd_text}`.
pub const JD_OPTIMIZE_PROMPT_TEMPLATE: &str = "\
Review this job description for:
- Inclusivity
- Clarity
- SEO keyword strength

Highlight problematic phrases and suggest specific rewrites.

Job Description:
{jd_text}";
