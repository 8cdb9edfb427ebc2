// Prompt for the ATS-style CV review. Both inputs are embedded verbatim.
// The reply is free text; `parser` relies on the model volunteering
// "Overall Match:", "Missing Keywords:", ... lines.

pub fn build_analysis_prompt(cv_text: &str, job_description: &str) -> String {
    format!(
        "Hey, act like a skilled or very experienced ATS (Application Tracking System) \
         with a deep understanding of the tech field of {job_description}. \
         Your task is to evaluate the resume based on the given job description. \
         You should provide the best assistance for improving their resumes. \
         Assign the percentage matching based on {job_description} and the missing keywords \
         with high accuracy. \
         Be honest with the score, even if the score gets 0% match. \
         Also suggest a better alternative job role based on my technical skills.\n\n\
         CV Text:\n{cv_text}"
    )
}
