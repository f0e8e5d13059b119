// All LLM prompt constants for the Outreach module.

/// System prompt for job-posting extraction — enforces JSON-only output.
pub const JOB_EXTRACT_SYSTEM: &str =
    "You are an expert at reading scraped career pages and extracting job postings. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Job extraction prompt template. Replace `{page_data}` before sending.
pub const JOB_EXTRACT_PROMPT_TEMPLATE: &str = r#"### SCRAPED TEXT FROM WEBSITE:
{page_data}

### INSTRUCTION:
The scraped text is from the careers page of a company website.
Extract the job postings and return them in JSON format containing the following keys: `company_name`, `role`, `experience`, `skills` and `description`.
If any information is not available, use "Not specified" instead of null.
Extract as much relevant information as possible for each field.
Return a single JSON object for one posting or a JSON array for several, and nothing else.

### VALID JSON (NO PREAMBLE):"#;

/// System prompt for cold-email drafting — plain text output, no subject line.
pub const MAIL_SYSTEM: &str =
    "You are a job seeker writing a professional cold email to a hiring manager. \
    Respond with the email body as plain text. \
    Do NOT include a subject line, preamble, or commentary.";

/// Cold-email prompt template.
/// Replace: {job_description}, {resume_sections}, {highlights}, {word_limit}
pub const MAIL_PROMPT_TEMPLATE: &str = r#"### JOB DESCRIPTION:
{job_description}

### RESUME:
{resume_sections}

### MOST RELEVANT RESUME EXCERPTS:
{highlights}

### INSTRUCTION:
You are a job seeker looking to apply for the job mentioned above.
Write a professional cold email to the hiring manager that includes the following:
1. A brief introduction of yourself.
2. A summary of your relevant skills and experience that match the job description.
3. Specific projects or achievements from the resume that demonstrate your qualifications, favoring the most relevant excerpts above.
4. A closing statement expressing your enthusiasm for the role, your availability for an interview, and that your resume is attached for reference.
5. A kind and polite note that you will follow up if you do not hear back within a reasonable timeframe.
Ensure the email is concise, well-structured, and free of any preamble or subject line.
Limit the email to {word_limit} words.

### EMAIL (NO PREAMBLE):"#;
