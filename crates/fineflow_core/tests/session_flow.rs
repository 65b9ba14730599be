use fineflow_core::{
    EntryForm, EntryStore, JournalService, MemoryMedium, SessionError, SessionService,
    SqliteMedium,
};

#[test]
fn sign_up_persists_user_until_logout() {
    let store = EntryStore::new(SqliteMedium::open_in_memory().unwrap());
    let session = SessionService::new(&store);
    assert!(!session.is_authenticated());

    let user = session
        .sign_up(" ana@example.com ", "secret1", " Ana Lima ")
        .unwrap();
    assert_eq!(user.name, "Ana Lima");
    assert_eq!(user.email, "ana@example.com");
    assert!(user.id.starts_with("user_"));
    assert_eq!(session.current_user(), Some(user));

    session.logout();
    assert!(!session.is_authenticated());
    assert_eq!(store.get_user(), None);
}

#[test]
fn sign_in_derives_name_from_email_local_part() {
    let store = EntryStore::new(MemoryMedium::new());
    let session = SessionService::new(&store);

    let user = session.sign_in("river.stone@example.com", "hunter22").unwrap();
    assert_eq!(user.name, "river.stone");
    assert!(store.app_state().is_authenticated);
}

#[test]
fn sign_up_reports_every_invalid_field() {
    let store = EntryStore::new(MemoryMedium::new());
    let session = SessionService::new(&store);

    match session.sign_up("not-an-email", "123", "A") {
        Err(SessionError::Validation(errors)) => {
            assert!(errors.contains("email"));
            assert!(errors.contains("password"));
            assert!(errors.contains("name"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(!session.is_authenticated());
}

#[test]
fn logout_keeps_entries() {
    let store = EntryStore::new(MemoryMedium::new());
    let session = SessionService::new(&store);
    let journal = JournalService::new(&store);

    session.sign_in("ana@example.com", "secret1").unwrap();
    journal.create_entry(&EntryForm::new("", "kept after logout")).unwrap();
    session.logout();

    assert_eq!(journal.list_entries().len(), 1);
}
