//! Integration tests for the repository layer against a real database.

use assert_matches::assert_matches;
use chrono::Utc;
use skillswap_core::assessment::{AssessmentProgress, Completion, ScoreField};
use skillswap_core::exchange::{ExchangeStatus, RatedParty, RatingUpdate};
use skillswap_db::models::exchange::{CreateExchange, ExchangeChange};
use skillswap_db::models::message::CreateMessage;
use skillswap_db::models::skill::{CreateSkill, UpdateSkill};
use skillswap_db::models::user::{CreateUser, User};
use skillswap_db::repositories::{
    AssessmentRepo, ExchangeRepo, MessageRepo, SkillRepo, UserRepo,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            full_name: format!("{username} tester"),
            bio: None,
            profile_image: None,
        },
    )
    .await
    .unwrap()
}

fn new_skill(name: &str, is_teaching: bool) -> CreateSkill {
    CreateSkill {
        name: name.to_string(),
        description: "A skill worth sharing with others".to_string(),
        category: "programming".to_string(),
        is_teaching,
        proficiency: is_teaching.then(|| "advanced".to_string()),
        icon: None,
    }
}

fn change(status: ExchangeStatus) -> ExchangeChange {
    ExchangeChange {
        status,
        student_rating: None,
        teacher_rating: None,
        rating_updates: Vec::new(),
        active_students_delta: 0,
    }
}

// ---------------------------------------------------------------------------
// Skills
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_skill_crud(pool: PgPool) {
    let owner = new_user(&pool, "owner").await;
    let teaching = SkillRepo::create(&pool, owner.id, &new_skill("Rust", true))
        .await
        .unwrap();
    SkillRepo::create(&pool, owner.id, &new_skill("Piano", false))
        .await
        .unwrap();

    assert_eq!(teaching.active_students, 0);
    assert!(teaching.average_rating.is_none());

    let listed = SkillRepo::list_for_user(&pool, owner.id, true).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(SkillRepo::count_for_user(&pool, owner.id, false).await.unwrap(), 1);
    assert_eq!(SkillRepo::list(&pool).await.unwrap().len(), 2);

    let patch = UpdateSkill {
        name: Some("Rust async".to_string()),
        description: None,
        category: None,
        proficiency: Some("expert".to_string()),
        icon: None,
    };
    let updated = SkillRepo::update(&pool, teaching.id, &patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Rust async");
    assert_eq!(updated.description, teaching.description);
    assert_eq!(updated.proficiency.as_deref(), Some("expert"));
    assert!(updated.is_teaching);

    assert!(SkillRepo::delete(&pool, teaching.id).await.unwrap());
    assert!(!SkillRepo::delete(&pool, teaching.id).await.unwrap());
    assert!(SkillRepo::find_by_id(&pool, teaching.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_learning_skill_rejects_proficiency_at_db_level(pool: PgPool) {
    let owner = new_user(&pool, "learner").await;
    let mut input = new_skill("Guitar", false);
    input.proficiency = Some("beginner".to_string());

    let result = SkillRepo::create(&pool, owner.id, &input).await;
    assert_matches!(result, Err(sqlx::Error::Database(_)));
}

// ---------------------------------------------------------------------------
// Assessments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assessment_progress_round_trip(pool: PgPool) {
    let user = new_user(&pool, "candidate").await;
    let skill = SkillRepo::create(&pool, user.id, &new_skill("Rust", true))
        .await
        .unwrap();

    let created = AssessmentRepo::create(&pool, skill.id, user.id).await.unwrap();
    assert_eq!(created.status, "pending");
    assert_eq!(created.current_step, 1);

    let mut progress = created.progress().unwrap();
    progress.record_score(ScoreField::Knowledge, 80).unwrap();
    progress.record_score(ScoreField::Practical, 85).unwrap();
    progress.record_score(ScoreField::Teaching, 90).unwrap();
    assert_eq!(progress.complete(Utc::now()).unwrap(), Completion::Completed);

    let saved = AssessmentRepo::save_progress(&pool, created.id, &progress)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(saved.status, "completed");
    assert_eq!(saved.current_step, 4);
    assert_eq!(saved.overall_score, Some(85));
    let first_completed_at = saved.completed_at.unwrap();

    // A later write carrying a different timestamp must not move it.
    let mut replay = saved.progress().unwrap();
    replay.completed_at = Some(first_completed_at + chrono::Duration::hours(1));
    let again = AssessmentRepo::save_progress(&pool, created.id, &replay)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.completed_at, Some(first_completed_at));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_assessment_lists(pool: PgPool) {
    let user = new_user(&pool, "lister").await;
    let skill = SkillRepo::create(&pool, user.id, &new_skill("Rust", true))
        .await
        .unwrap();
    let first = AssessmentRepo::create(&pool, skill.id, user.id).await.unwrap();
    let second = AssessmentRepo::create(&pool, skill.id, user.id).await.unwrap();

    let by_skill = AssessmentRepo::list_for_skill(&pool, skill.id).await.unwrap();
    assert_eq!(
        by_skill.iter().map(|a| a.id).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );
    assert_eq!(AssessmentRepo::list_for_user(&pool, user.id).await.unwrap().len(), 2);

    let fresh = AssessmentProgress::new();
    assert!(AssessmentRepo::save_progress(&pool, 9999, &fresh)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_message_thread_and_read_state(pool: PgPool) {
    let alice = new_user(&pool, "alice").await;
    let bob = new_user(&pool, "bob").await;
    let carol = new_user(&pool, "carol").await;

    let send = |from: i64, to: i64, text: &str| {
        let pool = pool.clone();
        let input = CreateMessage {
            receiver_id: to,
            content: text.to_string(),
        };
        async move { MessageRepo::create(&pool, from, &input).await.unwrap() }
    };

    let m1 = send(alice.id, bob.id, "hi bob").await;
    let m2 = send(bob.id, alice.id, "hi alice").await;
    send(carol.id, alice.id, "hello").await;

    assert!(!m1.is_read);

    let thread = MessageRepo::conversation(&pool, alice.id, bob.id).await.unwrap();
    assert_eq!(thread.iter().map(|m| m.id).collect::<Vec<_>>(), vec![m1.id, m2.id]);

    assert_eq!(MessageRepo::list_for_user(&pool, alice.id).await.unwrap().len(), 3);
    assert_eq!(MessageRepo::unread_count(&pool, alice.id).await.unwrap(), 2);

    let read = MessageRepo::mark_read(&pool, m2.id).await.unwrap().unwrap();
    assert!(read.is_read);
    assert_eq!(MessageRepo::unread_count(&pool, alice.id).await.unwrap(), 1);
    assert!(MessageRepo::mark_read(&pool, 9999).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Exchanges
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exchange_ratings_feed_the_named_party(pool: PgPool) {
    let teacher = new_user(&pool, "teacher").await;
    let student = new_user(&pool, "student").await;
    let skill = SkillRepo::create(&pool, teacher.id, &new_skill("Rust", true))
        .await
        .unwrap();

    let exchange = ExchangeRepo::create(
        &pool,
        &CreateExchange {
            teacher_id: teacher.id,
            student_id: student.id,
            teacher_skill_id: skill.id,
        },
    )
    .await
    .unwrap();
    assert_eq!(exchange.status, "pending");

    // teacher_rating reaches the teacher and the exchanged skill.
    let mut rate = change(ExchangeStatus::Pending);
    rate.teacher_rating = Some(4);
    rate.rating_updates = vec![RatingUpdate {
        rated: RatedParty::Teacher,
        rating: 4,
    }];
    let exchange = ExchangeRepo::apply_change(&pool, &exchange, &rate).await.unwrap();
    assert_eq!(exchange.teacher_rating, Some(4));

    let mut rerate = change(ExchangeStatus::Pending);
    rerate.teacher_rating = Some(2);
    rerate.rating_updates = vec![RatingUpdate {
        rated: RatedParty::Teacher,
        rating: 2,
    }];
    let exchange = ExchangeRepo::apply_change(&pool, &exchange, &rerate).await.unwrap();

    let teacher_row = UserRepo::find_by_id(&pool, teacher.id).await.unwrap().unwrap();
    let student_row = UserRepo::find_by_id(&pool, student.id).await.unwrap().unwrap();
    let skill_row = SkillRepo::find_by_id(&pool, skill.id).await.unwrap().unwrap();
    assert_eq!(teacher_row.average_rating, Some(3));
    assert_eq!(skill_row.average_rating, Some(3));
    assert_eq!(student_row.average_rating, None);

    // student_rating reaches the student only.
    let mut student_rates = change(ExchangeStatus::Pending);
    student_rates.student_rating = Some(5);
    student_rates.rating_updates = vec![RatingUpdate {
        rated: RatedParty::Student,
        rating: 5,
    }];
    ExchangeRepo::apply_change(&pool, &exchange, &student_rates)
        .await
        .unwrap();

    let teacher_row = UserRepo::find_by_id(&pool, teacher.id).await.unwrap().unwrap();
    let student_row = UserRepo::find_by_id(&pool, student.id).await.unwrap().unwrap();
    let skill_row = SkillRepo::find_by_id(&pool, skill.id).await.unwrap().unwrap();
    assert_eq!(student_row.average_rating, Some(5));
    assert_eq!(teacher_row.average_rating, Some(3));
    assert_eq!(skill_row.average_rating, Some(3));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exchange_active_students_counter(pool: PgPool) {
    let teacher = new_user(&pool, "teacher").await;
    let student = new_user(&pool, "student").await;
    let skill = SkillRepo::create(&pool, teacher.id, &new_skill("Rust", true))
        .await
        .unwrap();
    let exchange = ExchangeRepo::create(
        &pool,
        &CreateExchange {
            teacher_id: teacher.id,
            student_id: student.id,
            teacher_skill_id: skill.id,
        },
    )
    .await
    .unwrap();

    let mut activate = change(ExchangeStatus::Active);
    activate.active_students_delta = 1;
    let exchange = ExchangeRepo::apply_change(&pool, &exchange, &activate).await.unwrap();
    assert_eq!(exchange.status, "active");
    assert_eq!(ExchangeRepo::count_active_for_user(&pool, student.id).await.unwrap(), 1);
    let active = SkillRepo::find_by_id(&pool, skill.id).await.unwrap().unwrap();
    assert_eq!(active.active_students, 1);

    // Two decrements in a row must floor at zero.
    let mut finish = change(ExchangeStatus::Completed);
    finish.active_students_delta = -1;
    ExchangeRepo::apply_change(&pool, &exchange, &finish).await.unwrap();
    ExchangeRepo::apply_change(&pool, &exchange, &finish).await.unwrap();

    let done = SkillRepo::find_by_id(&pool, skill.id).await.unwrap().unwrap();
    assert_eq!(done.active_students, 0);
    assert_eq!(ExchangeRepo::count_active_for_user(&pool, teacher.id).await.unwrap(), 0);
    assert_eq!(ExchangeRepo::list_for_user(&pool, teacher.id).await.unwrap().len(), 1);
}
