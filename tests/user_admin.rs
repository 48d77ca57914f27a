//! Integration tests for account administration.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;

use medidesk_auth::gate::{LoginOutcome, SessionGate};
use medidesk_auth::password::{PasswordHasher, PasswordPolicy};
use medidesk_core::config::auth::AuthConfig;
use medidesk_core::config::bootstrap::BootstrapConfig;
use medidesk_core::config::session::SessionConfig;
use medidesk_core::error::ErrorKind;
use medidesk_database::repositories::patient::PatientRepository;
use medidesk_database::repositories::sequence::SequenceRepository;
use medidesk_entity::patient::NewOpdPatient;
use medidesk_entity::user::UserRole;
use medidesk_service::registration::{RegistrationService, SequenceAllocator};
use medidesk_service::user::UserAdminService;

fn admin_service(pool: &sqlx::PgPool, bootstrap: BootstrapConfig) -> UserAdminService {
    UserAdminService::new(
        common::user_repo(pool),
        Arc::new(PasswordHasher::new()),
        PasswordPolicy::new(&AuthConfig::default()),
        bootstrap,
    )
}

#[tokio::test]
async fn test_create_list_delete_account() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let admin = admin_service(&pool, BootstrapConfig::default());
    let username = common::unique_username("desk");

    let user = admin
        .create_user(&username, "reception7", UserRole::User, vec!["opd".into()])
        .await
        .unwrap();
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.sections_allowed, vec!["opd".to_string()]);
    assert_ne!(user.password_hash, "reception7", "password must be hashed");

    assert!(
        admin
            .list_users()
            .await
            .unwrap()
            .iter()
            .any(|u| u.username == username)
    );

    admin.delete_user(&username).await.unwrap();
    let gone = admin.delete_user(&username).await.unwrap_err();
    assert_eq!(gone.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_duplicate_username_is_a_conflict() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let admin = admin_service(&pool, BootstrapConfig::default());
    let username = common::unique_username("dup");

    admin
        .create_user(&username, "reception7", UserRole::User, vec![])
        .await
        .unwrap();
    let err = admin
        .create_user(&username, "reception7", UserRole::User, vec![])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_weak_passwords_are_rejected() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let admin = admin_service(&pool, BootstrapConfig::default());

    for weak in ["short1", "lettersonly", "12345678"] {
        let err = admin
            .create_user(&common::unique_username("weak"), weak, UserRole::User, vec![])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation, "password {weak:?}");
    }
}

#[tokio::test]
async fn test_bootstrap_admin_is_idempotent() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    // A unique bootstrap username keeps this test independent of any
    // previously seeded administrator.
    let bootstrap = BootstrapConfig {
        admin_username: common::unique_username("root"),
        admin_password: "admin123".into(),
    };
    let admin = admin_service(&pool, bootstrap.clone());

    assert!(admin.bootstrap_admin().await.unwrap());
    assert!(!admin.bootstrap_admin().await.unwrap());

    let seeded = admin
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .find(|u| u.username == bootstrap.admin_username)
        .expect("bootstrap admin must exist");
    assert!(seeded.is_admin());
}

#[tokio::test]
async fn test_builtin_admin_cannot_be_deleted() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let bootstrap = BootstrapConfig {
        admin_username: common::unique_username("root"),
        admin_password: "admin123".into(),
    };
    let admin = admin_service(&pool, bootstrap.clone());
    admin.bootstrap_admin().await.unwrap();

    let err = admin.delete_user(&bootstrap.admin_username).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
}

#[tokio::test]
async fn test_update_sections_replaces_the_grant_list() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let admin = admin_service(&pool, BootstrapConfig::default());
    let username = common::unique_username("sections");

    admin
        .create_user(&username, "reception7", UserRole::User, vec!["opd".into()])
        .await
        .unwrap();
    admin
        .update_sections(&username, vec!["epd".into(), "inventory".into()])
        .await
        .unwrap();

    let user = admin
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .find(|u| u.username == username)
        .unwrap();
    assert_eq!(user.sections_allowed, vec!["epd".to_string(), "inventory".to_string()]);
    assert!(user.may_open("epd"));
    assert!(!user.may_open("opd"));

    let err = admin
        .update_sections(&common::unique_username("ghost"), vec![])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_first_day_at_the_desk() {
    let Some(pool) = common::test_pool().await else {
        return;
    };

    // Fresh install: seed the administrator.
    let bootstrap = BootstrapConfig {
        admin_username: common::unique_username("root"),
        admin_password: "admin123".into(),
    };
    let admin = admin_service(&pool, bootstrap.clone());
    admin.bootstrap_admin().await.unwrap();

    // The administrator logs in with the default credentials.
    let gate = SessionGate::new(
        common::user_repo(&pool),
        Arc::new(PasswordHasher::new()),
        &SessionConfig::default(),
    );
    assert_eq!(
        gate.authenticate(&bootstrap.admin_username, "admin123")
            .await
            .unwrap(),
        LoginOutcome::Granted
    );

    // Registers the first patient of the day.
    let registration = RegistrationService::new(
        SequenceAllocator::new(Arc::new(SequenceRepository::new(pool.clone()))),
        Arc::new(PatientRepository::new(pool.clone())),
    );
    let number = registration
        .register_opd(&NewOpdPatient {
            demographics: common::demographics("Har Gobind"),
            registration_fee: Some(50.0),
            payment_status: Some("paid".into()),
            registration_date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            medical_department: Some("General Medicine".into()),
            created_by: Some(bootstrap.admin_username.clone()),
        })
        .await
        .unwrap();
    assert!(number.value >= 1);

    // Closes the application; the slot is free for tomorrow.
    gate.release(&bootstrap.admin_username).await.unwrap();
    let (active, _) = common::lease_state(&pool, &bootstrap.admin_username).await;
    assert!(!active);
}

#[tokio::test]
async fn test_force_unlock_frees_a_held_slot() {
    let Some(pool) = common::test_pool().await else {
        return;
    };
    let admin = admin_service(&pool, BootstrapConfig::default());
    let username = common::unique_username("stuck");
    common::create_user(&pool, &username, "password1", UserRole::User).await;

    // Simulate a crashed client holding the slot.
    sqlx::query("UPDATE users SET is_logged_in = TRUE, last_login_time = NOW() WHERE username = $1")
        .bind(&username)
        .execute(&pool)
        .await
        .unwrap();

    admin.force_unlock(&username).await.unwrap();
    let (active, _) = common::lease_state(&pool, &username).await;
    assert!(!active);

    let err = admin
        .force_unlock(&common::unique_username("ghost"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}
