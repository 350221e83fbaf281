// src/generation/prompts.rs
//! Prompt templates. Placeholders use `{{name}}`; literal single braces are
//! left alone, so JSON examples can be written as-is.

pub const COVER_LETTER: &str = r#"You are a professional cover letter writer. Create a compelling cover letter for a software engineering position.

The position is for this job posting: {{job_link}}

Write a professional cover letter that:
1. Has a formal business letter format
2. Shows enthusiasm for the role and company
3. Mentions key software engineering skills (full-stack development, Java, Python, React, etc.)
4. Highlights leadership and team collaboration experience
5. Demonstrates problem-solving abilities and technical expertise
6. Includes:
   - Professional greeting
   - 3-4 strong paragraphs
   - Professional closing
   - Proper spacing and formatting

Keep the tone professional but enthusiastic. Focus on full-stack development, software architecture,
and team leadership capabilities."#;

pub const OPTIMIZE_COVER_LETTER: &str = r#"I have written a cover letter for a {{position}} position at {{company}}. Please optimize it for clarity, conciseness, and impact while maintaining a professional and engaging tone. Ensure it highlights my most relevant skills and experiences effectively. Output only the improved cover letter without any explanations or additional commentary.

The cover letter to improve is:
"{{cover_letter}}""#;

pub const RESUME_ANALYSIS: &str = r#"You are a professional resume analyzer. Analyze this resume content and provide detailed results.

Resume content to analyze:
{{resume_content}}

Job links to analyze against:
{{job_links}}

IMPORTANT INSTRUCTIONS:
1. Always provide at least 3 recommendations, even for high matches
2. For matches above 75%, provide recommendations to excel in the role
3. Recommendations should be specific and actionable
4. Match percentage should be based on both technical skills and overall fit
5. For each job, provide a clear job title and company name

Return ONLY a JSON object with this exact structure:
{
    "jobs": [
        {
            "job_title": "<job title>",
            "company_name": "<company name>",
            "job_link": "<job url>",
            "match_percentage": <number 0-100>,
            "matching_skills": [<list of matching skills>],
            "missing_skills": [<list of missing skills>],
            "recommendations": [
                "Specific recommendation 1",
                "Specific recommendation 2",
                "Specific recommendation 3"
            ]
        }
    ]
}"#;

pub const RESUME_REVIEW: &str = r#"You are a professional resume reviewer and career coach. Review this resume against the job description
and provide detailed, actionable feedback to help improve the resume.

Resume content:
{{resume_content}}

Job description:
{{job_description}}

Analyze the resume and provide feedback with the following structure (respond ONLY with the JSON, no markdown formatting or other text):
{
    "strengths": ["Detailed strength point 1", "Detailed strength point 2", "Detailed strength point 3"],
    "weaknesses": ["Area for improvement 1", "Area for improvement 2", "Area for improvement 3"],
    "improvement_suggestions": [
        {"section": "Format", "suggestions": ["Specific suggestion 1", "Specific suggestion 2"]},
        {"section": "Content", "suggestions": ["Specific suggestion 1", "Specific suggestion 2"]},
        {"section": "Skills", "suggestions": ["Specific suggestion 1", "Specific suggestion 2"]},
        {"section": "Experience", "suggestions": ["Specific suggestion 1", "Specific suggestion 2"]},
        {"section": "Keywords", "suggestions": ["Specific suggestion 1", "Specific suggestion 2"]}
    ]
}"#;
