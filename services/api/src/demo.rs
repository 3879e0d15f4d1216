use std::sync::Arc;

use clap::Args;
use internlink::error::AppError;
use internlink::marketplace::{
    admin_overview, mentor_overview, student_overview, ApplicationStatus, EngagementPolicy,
    EngagementStore, IdentityStore, InternshipId, MemoryAdapter, NewApplicationInput,
    NewUserInput, Role,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Cap selections at each posting's max_students
    #[arg(long)]
    pub(crate) strict_capacity: bool,
    /// Reject a second application by the same student for the same posting
    #[arg(long)]
    pub(crate) reject_duplicates: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        strict_capacity,
        reject_duplicates,
    } = args;

    let policy = EngagementPolicy {
        strict_capacity,
        allow_duplicate_applications: !reject_duplicates,
    };

    let adapter = Arc::new(MemoryAdapter::default());
    let identity = IdentityStore::open(adapter.clone())?;
    let engagement = EngagementStore::open(adapter, policy)?;

    println!("InternLink marketplace demo (in-memory storage)");
    println!(
        "- Seeded {} users, {} internships, {} applications",
        identity.users().len(),
        engagement.internships().len(),
        engagement.applications().len()
    );

    let student = match identity.register(NewUserInput {
        email: "demo@university.edu".to_string(),
        name: "Demo Student".to_string(),
        role: Role::Student,
        password: "pw".to_string(),
        avatar: None,
        department: Some("Computer Science".to_string()),
        company: None,
        bio: None,
        skills: vec!["Rust".to_string()],
        experience: None,
    }) {
        Ok(student) => student,
        Err(err) => {
            println!("  Registration rejected: {err}");
            return Ok(());
        }
    };
    println!("- Registered {} as user {}", student.email, student.id);

    let session = match identity.login(&student.email, "pw") {
        Ok(user) => user,
        Err(err) => {
            println!("  Sign-in failed: {err}");
            return Ok(());
        }
    };
    println!("- Signed in as {}", session.name);

    let internship_id = InternshipId("1".to_string());
    let application = match engagement.apply_to_internship(
        &internship_id,
        NewApplicationInput {
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            cover_letter: "I would love to join this team.".to_string(),
            resume: None,
        },
    ) {
        Ok(application) => application,
        Err(err) => {
            println!("  Application rejected: {err}");
            return Ok(());
        }
    };
    println!(
        "- Applied to internship {} -> application {} ({})",
        internship_id,
        application.id,
        application.status.label()
    );

    match engagement.update_application_status(&application.id, ApplicationStatus::Accepted) {
        Ok(updated) => println!(
            "- Mentor review: application {} -> {}",
            updated.id,
            updated.status.label()
        ),
        Err(err) => println!("  Review failed: {err}"),
    }

    match engagement.select_student(&internship_id, &student.id) {
        Ok(internship) => println!(
            "- Selected {} for internship {} ({} of {} seats filled)",
            student.name,
            internship.id,
            internship.selected_students.len(),
            internship.max_students
        ),
        Err(err) => println!("  Selection rejected: {err}"),
    }

    let users = identity.users();
    let internships = engagement.internships();
    let applications = engagement.applications();

    let admin = admin_overview(&users, &internships, &applications);
    println!("\nAdmin dashboard");
    println!(
        "- {} users ({} students, {} mentors)",
        admin.total_users, admin.total_students, admin.total_mentors
    );
    println!(
        "- {} internships ({} active) | {} applications ({} pending)",
        admin.total_internships,
        admin.active_internships,
        admin.total_applications,
        admin.pending_applications
    );

    let mentor = mentor_overview(
        &internships[0].mentor_id,
        &internships,
        &applications,
    );
    println!("\nMentor dashboard ({})", internships[0].mentor_name);
    println!(
        "- {} postings ({} active) | {} applications received | {} students selected",
        mentor.total_postings,
        mentor.active_postings,
        mentor.applications_received,
        mentor.students_selected
    );

    let overview = student_overview(&student.id, &internships, &applications);
    println!("\nStudent dashboard ({})", student.name);
    println!(
        "- {} open internships | {} applications submitted | {} accepted",
        overview.open_internships, overview.applications_submitted, overview.applications_accepted
    );

    Ok(())
}
