//! Fixed catalogs backing the job-title and education suggestion fields.
//! Job titles are free text on the wire; these are only suggestions.

pub const JOB_TITLES: &[&str] = &[
    "Software Engineer",
    "Data Scientist",
    "Software Engineer Manager",
    "Data Analyst",
    "Senior Project Engineer",
    "Product Manager",
    "Full Stack Engineer",
    "Marketing Manager",
    "Senior Software Engineer",
    "Back end Developer",
    "Front end Developer",
    "Marketing Coordinator",
    "Junior Sales Associate",
    "Financial Manager",
    "Marketing Analyst",
    "Software Developer",
    "Operations Manager",
    "Human Resources Manager",
    "Director of Marketing",
    "Web Developer",
    "Product Designer",
    "Research Director",
    "Content Marketing Manager",
    "Sales Associate",
    "Senior Product Marketing Manager",
    "Director of HR",
    "Research Scientist",
    "Marketing Director",
    "Sales Director",
    "Senior Data Scientist",
    "Junior HR Generalist",
    "Junior Software Developer",
    "Receptionist",
    "Director of Data Science",
    "Sales Manager",
    "Digital Marketing Manager",
    "Junior Marketing Manager",
    "Junior Software Engineer",
    "Human Resources Coordinator",
    "Senior Research Scientist",
    "Senior Human Resources Manager",
    "Junior Web Developer",
    "Senior HR Generalist",
    "Junior Sales Representative",
    "Financial Analyst",
    "Sales Representative",
    "Sales Executive",
    "Other",
];

pub const EDUCATION_LEVELS: &[&str] = &[
    "Bachelor's Degree",
    "Master's Degree",
    "PhD",
    "High School",
];

/// Case-insensitive substring filter over a catalog. An empty query matches
/// everything.
pub fn filter_catalog<'a>(catalog: &[&'a str], query: &str) -> Vec<&'a str> {
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|entry| entry.to_lowercase().contains(&needle))
        .copied()
        .collect()
}

pub fn job_title_suggestions(query: &str) -> Vec<&'static str> {
    filter_catalog(JOB_TITLES, query)
}
