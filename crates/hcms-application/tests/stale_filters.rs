mod support;

use std::time::Duration;

use hcms_application::pages::AdminDashboard;
use hcms_application::{Field, PageController, UiEvent};
use hcms_core::role::Role;
use support::{Call, Harness, doctor};

fn search(value: &str) -> UiEvent {
    UiEvent::Input {
        field: Field::Search,
        value: value.to_string(),
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_slow_older_filter_does_not_overwrite_newer_result() {
    let harness = Harness::signed_in(Role::Admin, Some("tok"));
    harness.api.configure(|s| {
        s.doctors = Ok(vec![doctor("d1", "Dr. Abbott"), doctor("d2", "Dr. Adams")]);
        s.filter_delays.insert("A".into(), Duration::from_millis(300));
    });
    let page = AdminDashboard::new(harness.ctx.clone());
    page.load().await.unwrap();

    let (first, second) = tokio::join!(page.handle(search("A")), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        page.handle(search("Ab")).await
    });
    first.unwrap();
    second.unwrap();

    let filters: Vec<Option<String>> = harness
        .api
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::FilterDoctors(filter) => Some(filter.name),
            _ => None,
        })
        .collect();
    assert_eq!(filters, vec![Some("A".to_string()), Some("Ab".to_string())]);

    let content = page.view().await.content;
    let cards = content.find_by_class("doctor-card");
    assert_eq!(cards.len(), 1, "the slower, older response was applied");
    assert!(cards[0].all_text().contains("Dr. Abbott"));
}

#[tokio::test]
async fn test_clearing_the_search_lists_all_doctors() {
    let harness = Harness::signed_in(Role::Admin, Some("tok"));
    harness.api.configure(|s| {
        s.doctors = Ok(vec![doctor("d1", "Dr. Abbott"), doctor("d2", "Dr. Adams")]);
    });
    let page = AdminDashboard::new(harness.ctx.clone());
    page.load().await.unwrap();

    page.handle(search("abb")).await.unwrap();
    assert_eq!(page.view().await.content.find_by_class("doctor-card").len(), 1);

    page.handle(search("   ")).await.unwrap();
    assert_eq!(page.view().await.content.find_by_class("doctor-card").len(), 2);
    assert_eq!(harness.api.calls().last(), Some(&Call::ListDoctors));
}
