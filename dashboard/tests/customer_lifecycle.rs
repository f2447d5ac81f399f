//! End-to-end customer lifecycle through the in-memory store and a session.

use std::sync::Arc;

use dashboard::domain::form::{FieldName, FormMode};
use dashboard::domain::ports::{CustomerStore, NotificationLevel};
use dashboard::domain::query_cache::QueryCache;
use dashboard::domain::ui_state::{Column, ModalState, UiAction, UiState};
use dashboard::domain::{CustomerService, CustomerId, MutationOutcome, PaymentStatus};
use dashboard::outbound::{InMemoryCustomerStore, MissingRecordPolicy, RecordingNotifier, StoreLatency};
use dashboard::session::DashboardSession;
use rstest::{fixture, rstest};

type Session = DashboardSession<InMemoryCustomerStore, RecordingNotifier>;

struct Harness {
    store: Arc<InMemoryCustomerStore>,
    notifier: RecordingNotifier,
    session: Session,
}

#[fixture]
fn harness() -> Harness {
    let store = Arc::new(InMemoryCustomerStore::new(
        StoreLatency::none(),
        MissingRecordPolicy::Ignore,
    ));
    let notifier = RecordingNotifier::new();
    let service = CustomerService::new(
        Arc::clone(&store),
        Arc::new(notifier.clone()),
        QueryCache::default(),
    );
    Harness {
        store,
        notifier,
        session: DashboardSession::new(service, UiState::default()),
    }
}

fn fill(session: &mut Session, values: &[(FieldName, &str)]) {
    let form = session.form_mut().expect("form open");
    for (name, value) in values {
        form.change(*name, *value).expect("form editable");
    }
}

fn messages(notifier: &RecordingNotifier) -> Vec<String> {
    notifier
        .take()
        .into_iter()
        .map(|notification| {
            assert_eq!(notification.level, NotificationLevel::Success);
            notification.message
        })
        .collect()
}

#[rstest]
#[tokio::test]
async fn add_update_delete_round_trip(harness: Harness) {
    let Harness {
        store,
        notifier,
        mut session,
    } = harness;
    assert_eq!(session.refresh().await.expect("listed"), 0);

    session.dispatch(UiAction::OpenAddModal);
    fill(
        &mut session,
        &[
            (FieldName::Name, "Acme"),
            (FieldName::Status, "Open"),
            (FieldName::Rate, "70"),
            (FieldName::Balance, "0"),
            (FieldName::Deposit, "500"),
        ],
    );
    let MutationOutcome::Committed(created) = session.submit_form().await.expect("valid form")
    else {
        panic!("store accepts the add");
    };
    assert_eq!(created.id.as_str(), "1");
    assert_eq!(session.ui().modal, ModalState::Closed);
    assert!(session.form().is_none());

    let listed = store.get_all().await.expect("listed");
    assert_eq!(listed, vec![created.clone()]);
    assert_eq!(session.rows(), listed);

    session.dispatch(UiAction::ToggleRow(created.id.clone()));
    let open_edit = session.toolbar().primary_action().expect("single selection");
    session.dispatch(open_edit);
    assert!(matches!(
        session.form().map(|form| form.mode()),
        Some(FormMode::Edit(_))
    ));
    fill(&mut session, &[(FieldName::Status, "Paid")]);
    let updated = session
        .submit_form()
        .await
        .expect("valid form")
        .into_result()
        .expect("store accepts the update");
    assert_eq!(updated.id, created.id);

    let listed = store.get_all().await.expect("listed");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id.as_str(), "1");
    assert_eq!(listed[0].status, PaymentStatus::Paid);
    assert_eq!(session.rows()[0].status, PaymentStatus::Paid);

    session.dispatch(UiAction::RequestDelete(vec![created.id.clone()]));
    let deleted = session.confirm_delete().await.expect("dialog open");
    assert_eq!(deleted, MutationOutcome::Committed(1));
    assert!(store.get_all().await.expect("listed").is_empty());
    assert!(session.rows().is_empty());
    assert!(session.ui().table.selection().is_empty());
    assert!(!session.ui().delete_dialog.open);

    assert_eq!(
        messages(&notifier),
        vec![
            "Customer added successfully",
            "Customer updated successfully",
            "1 customer deleted",
        ]
    );
}

#[rstest]
#[tokio::test]
async fn bulk_delete_removes_only_the_selection(harness: Harness) {
    let Harness {
        store, mut session, ..
    } = harness;
    for name in ["Ann", "Ahmad", "Zain"] {
        session.dispatch(UiAction::OpenAddModal);
        fill(
            &mut session,
            &[
                (FieldName::Name, name),
                (FieldName::Status, "Due"),
                (FieldName::Rate, "10"),
                (FieldName::Balance, "-5"),
                (FieldName::Deposit, "0"),
            ],
        );
        assert!(session.submit_form().await.expect("valid").is_committed());
    }
    session.refresh().await.expect("listed");

    session.dispatch(UiAction::ToggleRow(CustomerId::from_sequence(1)));
    session.dispatch(UiAction::ToggleRow(CustomerId::from_sequence(3)));
    let toolbar = session.toolbar();
    assert!(!toolbar.is_primary_enabled());
    assert!(!toolbar.shows_filters());
    assert!(session.request_delete_selected());

    let outcome = session.confirm_delete().await.expect("dialog open");
    assert_eq!(outcome, MutationOutcome::Committed(2));
    let names: Vec<String> = store
        .get_all()
        .await
        .expect("listed")
        .into_iter()
        .map(|customer| customer.name)
        .collect();
    assert_eq!(names, vec!["Ahmad"]);
    assert!(session.ui().table.selection().is_empty());
}

#[rstest]
#[tokio::test]
async fn filters_apply_to_cached_rows(harness: Harness) {
    let Harness {
        store, mut session, ..
    } = harness;
    for (name, status) in [("Acme", "Open"), ("Globex", "Paid"), ("Initech", "Open")] {
        session.dispatch(UiAction::OpenAddModal);
        fill(
            &mut session,
            &[
                (FieldName::Name, name),
                (FieldName::Status, status),
                (FieldName::Rate, "1"),
                (FieldName::Balance, "0"),
                (FieldName::Deposit, "0"),
            ],
        );
        session.submit_form().await.expect("valid");
    }
    assert_eq!(store.get_all().await.expect("listed").len(), 3);
    session.refresh().await.expect("listed");

    session.dispatch(UiAction::SetColumnFilter {
        column: Column::Status,
        value: "open".to_owned(),
    });
    assert_eq!(session.table_view().filtered_count(), 2);
    assert_eq!(session.toolbar().status_filter(), Some("open"));

    session.dispatch(UiAction::SetGlobalFilter("init".to_owned()));
    let view = session.table_view();
    assert_eq!(view.filtered_count(), 1);
    assert_eq!(view.rows()[0].name, "Initech");

    session.dispatch(UiAction::ResetTable);
    assert_eq!(session.table_view().filtered_count(), 3);
}
