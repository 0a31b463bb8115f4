//! Integration tests for the model layer through blocking sessions
//!
//! Same relationships as the async suite, driven from plain threads.
//! Run with: cargo test --test blocking_models_tests

mod common;

use common::{ids, init_tracing};
use tasknest_core::blocking::Database;
use tasknest_core::models::{CreateProject, CreateTask, CreateUser, TaskStatus};
use tasknest_core::ModelError;

fn setup_database() -> Database {
    init_tracing();
    Database::in_memory().expect("Failed to create in-memory database")
}

#[test]
fn test_user_projects() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    session
        .create_project(CreateProject::new("Test", "Test project", user.id))
        .unwrap();

    assert_eq!(session.get_projects(&user).unwrap().len(), 1);
    assert_eq!(session.count_projects(&user).unwrap(), 1);
    session.rollback().unwrap();
}

#[test]
fn test_get_projects_in_insertion_order() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let bob = session.create_user(CreateUser::new("Bob")).unwrap();
    let alice = session.create_user(CreateUser::new("Alice")).unwrap();

    let mut expected = Vec::new();
    for name in ["One", "Two", "Three"] {
        expected.push(session.create_project(CreateProject::new(name, "", bob.id)).unwrap().id);
        session.create_project(CreateProject::new(name, "", alice.id)).unwrap();
    }

    let projects = session.get_projects(&bob).unwrap();
    assert_eq!(ids(&projects, |p| p.id), expected);
}

#[test]
fn test_user_inbox_project() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    session.create_project(CreateProject::new("Work", "", user.id)).unwrap();
    let inbox = session
        .create_project(CreateProject::new("Inbox", "Bob's inbox", user.id).inbox())
        .unwrap();

    assert_eq!(session.get_inbox(&user).unwrap().id, inbox.id);
}

#[test]
fn test_user_no_inbox_project() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    let first = session
        .create_project(CreateProject::new("Inbox", "Bob's inbox", user.id))
        .unwrap();
    let work = session.create_project(CreateProject::new("Work", "", user.id)).unwrap();

    assert_eq!(session.get_inbox(&user).unwrap().id, first.id);

    session.set_project_inbox(work.id, true).unwrap();
    assert_eq!(session.get_inbox(&user).unwrap().id, work.id);
}

#[test]
fn test_inbox_without_projects_fails() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();

    match session.get_inbox(&user) {
        Err(ModelError::NoProjects { user_id }) => assert_eq!(user_id, user.id),
        other => panic!("expected NoProjects, got {:?}", other),
    }
}

#[test]
fn test_active_and_archived_projects() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    let active = session.create_project(CreateProject::new("Active", "", user.id)).unwrap();
    let archived = session
        .create_project(CreateProject::new("Old", "", user.id).archived())
        .unwrap();

    assert_eq!(ids(&session.get_active_projects(&user).unwrap(), |p| p.id), vec![active.id]);
    assert_eq!(ids(&session.get_archived_projects(&user).unwrap(), |p| p.id), vec![archived.id]);

    session.set_project_archived(archived.id, false).unwrap();
    assert!(session.get_archived_projects(&user).unwrap().is_empty());
    assert_eq!(session.get_active_projects(&user).unwrap().len(), 2);
}

#[test]
fn test_project_owner() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    let project = session
        .create_project(CreateProject::new("Test", "Test project", user.id))
        .unwrap();

    assert_eq!(session.project_owner(&project).unwrap().id, user.id);
}

#[test]
fn test_project_tasks_and_status_partition() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    let project = session
        .create_project(CreateProject::new("Test", "Test project", user.id))
        .unwrap();

    let open = session
        .create_task(CreateTask::new("Open", "", user.id, project.id))
        .unwrap();
    let done = session
        .create_task(CreateTask::new("Done", "", user.id, project.id))
        .unwrap();
    session.complete_task(done.id).unwrap();

    assert_eq!(session.get_tasks(&project).unwrap().len(), 2);
    assert_eq!(session.count_tasks(&project).unwrap(), 2);
    assert_eq!(ids(&session.get_completed_tasks(&project).unwrap(), |t| t.id), vec![done.id]);
    assert_eq!(ids(&session.get_unfinished_tasks(&project).unwrap(), |t| t.id), vec![open.id]);

    let reopened = session.reopen_task(done.id).unwrap().unwrap();
    assert_eq!(reopened.status, TaskStatus::NotCompleted);
    assert!(session.get_completed_tasks(&project).unwrap().is_empty());
}

#[test]
fn test_task_author_and_project() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    let project = session
        .create_project(CreateProject::new("Test", "Test project", user.id))
        .unwrap();
    let task = session
        .create_task(CreateTask::new("Test", "Test task", user.id, project.id))
        .unwrap();

    assert_eq!(session.task_author(&task).unwrap().id, user.id);
    assert_eq!(session.task_project(&task).unwrap().id, project.id);
    assert_eq!(session.find_task_by_name("Test").unwrap().unwrap().id, task.id);
    assert_eq!(session.find_task(task.id).unwrap().unwrap(), task);
}

#[test]
fn test_lookups_and_deletes() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    let project = session.create_project(CreateProject::new("Test", "", user.id)).unwrap();

    assert_eq!(session.find_user_by_name("Bob").unwrap().unwrap().id, user.id);
    assert_eq!(session.find_project_by_name("Test").unwrap().unwrap().id, project.id);
    assert!(session.record_login(user.id).unwrap().is_some());

    assert!(session.delete_user(user.id).is_err());
    assert!(session.delete_project(project.id).unwrap());
    assert!(session.delete_user(user.id).unwrap());
    assert!(session.find_user(user.id).unwrap().is_none());
    assert!(session.find_project(project.id).unwrap().is_none());
}

#[test]
fn test_delete_task() {
    let db = setup_database();
    let mut session = db.session().unwrap();

    let user = session.create_user(CreateUser::new("Bob")).unwrap();
    let project = session.create_project(CreateProject::new("Test", "", user.id)).unwrap();
    let task = session
        .create_task(CreateTask::new("Test", "", user.id, project.id))
        .unwrap();

    assert!(session.delete_task(task.id).unwrap());
    assert!(!session.delete_task(task.id).unwrap());
    assert!(session.get_tasks(&project).unwrap().is_empty());
}

#[test]
fn test_commit_and_rollback() {
    let db = setup_database();

    let mut session = db.session().unwrap();
    let kept = session.create_user(CreateUser::new("Kept")).unwrap();
    session.commit().unwrap();

    let mut session = db.session().unwrap();
    session.create_user(CreateUser::new("Discarded")).unwrap();
    session.rollback().unwrap();

    {
        let mut session = db.session().unwrap();
        session.create_user(CreateUser::new("Dropped")).unwrap();
    }

    let mut session = db.session().unwrap();
    assert_eq!(session.find_user_by_name("Kept").unwrap().unwrap().id, kept.id);
    assert!(session.find_user_by_name("Discarded").unwrap().is_none());
    assert!(session.find_user_by_name("Dropped").unwrap().is_none());
}

#[test]
fn test_migrations_applied() {
    let db = setup_database();

    let status = db.migration_status().unwrap();
    assert_eq!(status.applied_migrations, 3);
    assert!(status.is_up_to_date);
}

#[test]
fn test_databases_are_isolated() {
    let first = setup_database();
    let second = setup_database();

    let mut session = first.session().unwrap();
    session.create_user(CreateUser::new("Bob")).unwrap();
    session.commit().unwrap();

    let mut session = second.session().unwrap();
    assert!(session.find_user_by_name("Bob").unwrap().is_none());
}

#[test]
fn test_pool_holds_the_single_in_memory_connection() {
    let db = setup_database();
    assert_eq!(db.pool().size(), 1);
    assert!(!db.pool().is_closed());

    let session = db.session().unwrap();
    assert_eq!(db.pool().num_idle(), 0, "The open session holds the only connection");
    drop(session);
}
