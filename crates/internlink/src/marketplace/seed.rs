//! Built-in first-run dataset.
//!
//! Returned by the stores whenever a collection key has never been saved. The
//! application's applicant cross-reference is mirrored in internship `1` so
//! the seeded state already satisfies the applicant-sync invariant.

use chrono::NaiveDate;

use super::engagement::{
    Application, ApplicationId, ApplicationStatus, Internship, InternshipId, InternshipStatus,
    WorkMode,
};
use super::identity::{Role, User, UserId};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

pub(crate) fn users() -> Vec<User> {
    vec![
        User {
            id: UserId("1".to_string()),
            email: "admin@internlink.com".to_string(),
            name: "System Admin".to_string(),
            role: Role::Admin,
            avatar: Some(
                "https://images.pexels.com/photos/91227/pexels-photo-91227.jpeg?auto=compress&cs=tinysrgb&w=400"
                    .to_string(),
            ),
            department: None,
            company: None,
            bio: None,
            skills: Vec::new(),
            experience: None,
        },
        User {
            id: UserId("2".to_string()),
            email: "mentor@company.com".to_string(),
            name: "Sarah Johnson".to_string(),
            role: Role::Mentor,
            avatar: Some(
                "https://images.pexels.com/photos/733872/pexels-photo-733872.jpeg?auto=compress&cs=tinysrgb&w=400"
                    .to_string(),
            ),
            department: Some("Software Engineering".to_string()),
            company: Some("Tech Solutions Inc.".to_string()),
            bio: Some(
                "Senior Software Engineer with 8+ years of experience in full-stack development."
                    .to_string(),
            ),
            skills: vec![
                "React".to_string(),
                "Node.js".to_string(),
                "Python".to_string(),
                "Machine Learning".to_string(),
            ],
            experience: Some(8),
        },
        User {
            id: UserId("3".to_string()),
            email: "student@university.edu".to_string(),
            name: "Alex Chen".to_string(),
            role: Role::Student,
            avatar: Some(
                "https://images.pexels.com/photos/1040880/pexels-photo-1040880.jpeg?auto=compress&cs=tinysrgb&w=400"
                    .to_string(),
            ),
            department: Some("Computer Science".to_string()),
            company: None,
            bio: Some("Computer Science student passionate about web development and AI.".to_string()),
            skills: vec![
                "JavaScript".to_string(),
                "React".to_string(),
                "Python".to_string(),
            ],
            experience: None,
        },
    ]
}

pub(crate) fn internships() -> Vec<Internship> {
    vec![
        Internship {
            id: InternshipId("1".to_string()),
            title: "Frontend Developer Intern".to_string(),
            company: "Tech Solutions Inc.".to_string(),
            description: "Join our dynamic team to work on cutting-edge web applications using React, TypeScript, and modern CSS frameworks.".to_string(),
            requirements: vec![
                "React".to_string(),
                "TypeScript".to_string(),
                "HTML/CSS".to_string(),
                "Git".to_string(),
            ],
            duration: "3 months".to_string(),
            location: "San Francisco, CA".to_string(),
            work_mode: WorkMode::Hybrid,
            mentor_id: UserId("2".to_string()),
            mentor_name: "Sarah Johnson".to_string(),
            posted_date: date(2024, 1, 15),
            deadline: date(2024, 2, 15),
            status: InternshipStatus::Active,
            applicants: vec![UserId("3".to_string())],
            selected_students: Vec::new(),
            max_students: 2,
            tags: vec![
                "Frontend".to_string(),
                "React".to_string(),
                "JavaScript".to_string(),
            ],
            salary: Some("$2000/month".to_string()),
        },
        Internship {
            id: InternshipId("2".to_string()),
            title: "Data Science Intern".to_string(),
            company: "Analytics Corp".to_string(),
            description: "Work with our data science team on machine learning projects and data analysis using Python and modern ML frameworks.".to_string(),
            requirements: vec![
                "Python".to_string(),
                "Machine Learning".to_string(),
                "Statistics".to_string(),
                "SQL".to_string(),
            ],
            duration: "4 months".to_string(),
            location: "New York, NY".to_string(),
            work_mode: WorkMode::Onsite,
            mentor_id: UserId("2".to_string()),
            mentor_name: "Sarah Johnson".to_string(),
            posted_date: date(2024, 1, 10),
            deadline: date(2024, 2, 20),
            status: InternshipStatus::Active,
            applicants: Vec::new(),
            selected_students: Vec::new(),
            max_students: 1,
            tags: vec![
                "Data Science".to_string(),
                "Python".to_string(),
                "ML".to_string(),
            ],
            salary: Some("$2500/month".to_string()),
        },
    ]
}

pub(crate) fn applications() -> Vec<Application> {
    vec![Application {
        id: ApplicationId("1".to_string()),
        internship_id: InternshipId("1".to_string()),
        student_id: UserId("3".to_string()),
        student_name: "Alex Chen".to_string(),
        applied_date: date(2024, 1, 16),
        status: ApplicationStatus::Pending,
        cover_letter: "I am very interested in this frontend developer internship opportunity. I have experience with React and TypeScript through my coursework and personal projects.".to_string(),
        resume: None,
    }]
}
