mod common;

use std::sync::Arc;

use common::{MemoryBookingStore, at, booking, service, user};
use padel_club_api::{
    dto::bookings::{CreateBookingRequest, UpdateBookingRequest},
    error::AppError,
    models::BookingStatus,
    routes::params::BookingListQuery,
};

fn create_request(court: &str, start_time: &str, hours: f64) -> CreateBookingRequest {
    CreateBookingRequest {
        court: Some(court.to_string()),
        start_time: Some(start_time.to_string()),
        duration_hours: Some(hours),
        ..CreateBookingRequest::default()
    }
}

fn central_store() -> (Arc<MemoryBookingStore>, uuid::Uuid) {
    let existing = booking(
        "Central",
        at(2030, 5, 17, 10, 0),
        1.0,
        BookingStatus::Confirmed,
        "ana@example.com",
    );
    let id = existing.id;
    (Arc::new(MemoryBookingStore::with(vec![existing])), id)
}

#[tokio::test]
async fn availability_on_central_court() {
    let (store, existing_id) = central_store();
    let service = service(store);

    let overlapping = service
        .check_court_availability("Central", Some("2030-05-17"), Some("10:30"), Some(1.0))
        .await
        .unwrap()
        .data
        .unwrap();
    assert!(!overlapping.available);
    assert_eq!(overlapping.conflict_count, 1);
    assert_eq!(overlapping.conflicts[0].id, existing_id);

    for time in ["11:00", "09:00"] {
        let free = service
            .check_court_availability("Central", Some("2030-05-17"), Some(time), None)
            .await
            .unwrap()
            .data
            .unwrap();
        assert!(free.available, "{time} should be free");
        assert_eq!(free.conflict_count, 0);
    }
}

#[tokio::test]
async fn availability_for_unknown_court_is_not_found() {
    let (store, _) = central_store();
    let err = service(store)
        .check_court_availability("Atlantis", Some("2030-05-17T10:00:00Z"), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn create_prices_the_slot_and_records_the_owner() {
    let store = Arc::new(MemoryBookingStore::default());
    let service = service(store.clone());
    let caller = user("Marta", "Marta@Example.com");

    let created = service
        .create_booking(&caller, create_request("Norte", "2030-05-17T18:00:00Z", 1.5))
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(created.status, BookingStatus::Pending);
    assert_eq!(created.price_cents, 3000);
    assert_eq!(created.owner_email, "marta@example.com");
    assert_eq!(created.player_name, "Marta");
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn create_in_the_past_does_not_touch_the_store() {
    let (store, _) = central_store();
    let before = store.snapshot();

    let err = service(store.clone())
        .create_booking(
            &user("Marta", "marta@example.com"),
            create_request("Sur", "2001-01-01T10:00:00Z", 1.0),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn overlapping_create_is_a_conflict() {
    let (store, _) = central_store();
    let before = store.snapshot();

    let err = service(store.clone())
        .create_booking(
            &user("Marta", "marta@example.com"),
            create_request("Central", "2030-05-17T10:30:00Z", 1.0),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.status().as_u16(), 409);
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn adjacent_and_cancelled_slots_can_be_booked() {
    let store = Arc::new(MemoryBookingStore::with(vec![
        booking(
            "Central",
            at(2030, 5, 17, 10, 0),
            1.0,
            BookingStatus::Confirmed,
            "ana@example.com",
        ),
        booking(
            "Central",
            at(2030, 5, 17, 12, 0),
            1.0,
            BookingStatus::Cancelled,
            "ana@example.com",
        ),
    ]));
    let service = service(store.clone());
    let caller = user("Marta", "marta@example.com");

    service
        .create_booking(&caller, create_request("Central", "2030-05-17T11:00:00Z", 1.0))
        .await
        .unwrap();
    service
        .create_booking(&caller, create_request("Central", "2030-05-17T12:00:00Z", 1.0))
        .await
        .unwrap();

    assert_eq!(store.snapshot().len(), 4);
}

#[tokio::test]
async fn invalid_requests_are_validation_errors() {
    let store = Arc::new(MemoryBookingStore::default());
    let service = service(store.clone());
    let caller = user("Marta", "marta@example.com");

    for hours in [0.0, -1.0] {
        let err = service
            .create_booking(&caller, create_request("Central", "2030-05-17T10:00:00Z", hours))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    let err = service
        .create_booking(&caller, create_request("Vieja", "2030-05-17T10:00:00Z", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = service
        .create_booking(&caller, create_request("Atlantis", "2030-05-17T10:00:00Z", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn only_the_owner_can_change_a_booking() {
    let (store, id) = central_store();
    let before = store.snapshot();
    let service = service(store.clone());
    let intruder = user("Pablo", "pablo@example.com");

    let err = service
        .update_booking(
            &intruder,
            id,
            UpdateBookingRequest {
                status: Some("cancelled".into()),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = service.delete_booking(&intruder, id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert_eq!(err.status().as_u16(), 403);

    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn owner_can_extend_without_conflicting_with_itself() {
    let (store, id) = central_store();
    let service = service(store.clone());
    let owner = user("Ana", "ANA@example.com");

    let updated = service
        .update_booking(
            &owner,
            id,
            UpdateBookingRequest {
                duration_hours: Some(2.0),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(updated.duration_hours, 2.0);
    assert_eq!(updated.price_cents, 5000);
}

#[tokio::test]
async fn moving_onto_an_occupied_slot_is_a_conflict() {
    let (store, id) = central_store();
    let other = booking(
        "Norte",
        at(2030, 5, 17, 10, 0),
        1.0,
        BookingStatus::Pending,
        "luis@example.com",
    );
    let other_id = other.id;
    let store = Arc::new(MemoryBookingStore::with(
        store.snapshot().into_iter().chain([other]).collect(),
    ));
    let before = store.snapshot();

    let err = service(store.clone())
        .update_booking(
            &user("Luis", "luis@example.com"),
            other_id,
            UpdateBookingRequest {
                court: Some("Central".into()),
                ..UpdateBookingRequest::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(store.snapshot(), before);
    assert!(store.snapshot().iter().any(|b| b.id == id));
}

#[tokio::test]
async fn owner_deletes_a_booking() {
    let (store, id) = central_store();
    let service = service(store.clone());

    let deleted = service
        .delete_booking(&user("Ana", "ana@example.com"), id)
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(deleted.id, id);
    assert!(store.snapshot().is_empty());
    assert!(matches!(
        service.get_booking(id).await.unwrap_err(),
        AppError::NotFound(_)
    ));
}

#[tokio::test]
async fn list_filters_by_status_and_pages() {
    let store = Arc::new(MemoryBookingStore::with(vec![
        booking("Central", at(2030, 5, 17, 9, 0), 1.0, BookingStatus::Confirmed, "a@example.com"),
        booking("Central", at(2030, 5, 17, 11, 0), 1.0, BookingStatus::Confirmed, "a@example.com"),
        booking("Sur", at(2030, 5, 18, 9, 0), 1.0, BookingStatus::Cancelled, "b@example.com"),
    ]));

    let resp = service(store)
        .list_bookings(BookingListQuery {
            status: Some("confirmed".into()),
            per_page: Some(1),
            ..BookingListQuery::default()
        })
        .await
        .unwrap();

    let items = resp.data.unwrap().items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].start_time, at(2030, 5, 17, 11, 0));
    let meta = resp.meta.unwrap();
    assert_eq!(meta.total, Some(2));
    assert_eq!(meta.pages, Some(2));
}

#[tokio::test]
async fn dashboard_excludes_cancelled_revenue() {
    let store = Arc::new(MemoryBookingStore::with(vec![
        booking("Central", at(2030, 5, 17, 9, 0), 1.0, BookingStatus::Confirmed, "a@example.com"),
        booking("Central", at(2030, 5, 18, 9, 0), 1.0, BookingStatus::Cancelled, "a@example.com"),
    ]));

    let dashboard = service(store).dashboard().await.unwrap().data.unwrap();

    assert_eq!(dashboard.total_bookings, 2);
    assert_eq!(dashboard.total_revenue_cents, 2500);
}

fn reactivate(status: &str) -> UpdateBookingRequest {
    UpdateBookingRequest {
        status: Some(status.into()),
        ..UpdateBookingRequest::default()
    }
}

#[tokio::test]
async fn reactivating_over_a_taken_slot_is_a_conflict() {
    let cancelled = booking(
        "Central",
        at(2030, 5, 17, 10, 0),
        1.0,
        BookingStatus::Cancelled,
        "ana@example.com",
    );
    let cancelled_id = cancelled.id;
    let taken = booking(
        "Central",
        at(2030, 5, 17, 10, 0),
        1.0,
        BookingStatus::Confirmed,
        "luis@example.com",
    );
    let store = Arc::new(MemoryBookingStore::with(vec![cancelled, taken]));
    let before = store.snapshot();

    let err = service(store.clone())
        .update_booking(&user("Ana", "ana@example.com"), cancelled_id, reactivate("pending"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(store.snapshot(), before);
}

#[tokio::test]
async fn reactivating_a_free_slot_succeeds() {
    let cancelled = booking(
        "Central",
        at(2030, 5, 17, 10, 0),
        1.0,
        BookingStatus::Cancelled,
        "ana@example.com",
    );
    let cancelled_id = cancelled.id;
    let elsewhere = booking(
        "Norte",
        at(2030, 5, 17, 10, 0),
        1.0,
        BookingStatus::Confirmed,
        "luis@example.com",
    );
    let store = Arc::new(MemoryBookingStore::with(vec![cancelled, elsewhere]));

    let updated = service(store)
        .update_booking(&user("Ana", "ana@example.com"), cancelled_id, reactivate("confirmed"))
        .await
        .unwrap()
        .data
        .unwrap();

    assert_eq!(updated.status, BookingStatus::Confirmed);
}

#[tokio::test]
async fn huge_page_returns_an_empty_page() {
    let (store, _) = central_store();

    let resp = service(store)
        .list_bookings(BookingListQuery {
            page: Some(i64::MAX),
            ..BookingListQuery::default()
        })
        .await
        .unwrap();

    assert!(resp.data.unwrap().items.is_empty());
    assert_eq!(resp.meta.unwrap().total, Some(1));
}

#[tokio::test]
async fn list_matches_court_and_player_substrings() {
    let mut marta = booking("Norte", at(2030, 5, 17, 9, 0), 1.0, BookingStatus::Pending, "m@example.com");
    marta.player_name = "Marta Ruiz".into();
    let store = Arc::new(MemoryBookingStore::with(vec![
        booking("Central", at(2030, 5, 17, 9, 0), 1.0, BookingStatus::Confirmed, "a@example.com"),
        marta,
    ]));
    let service = service(store);

    let by_court = service
        .list_bookings(BookingListQuery {
            court: Some("cENT".into()),
            ..BookingListQuery::default()
        })
        .await
        .unwrap()
        .data
        .unwrap()
        .items;
    assert_eq!(by_court.len(), 1);
    assert_eq!(by_court[0].court_name, "Central");

    let by_player = service
        .list_bookings(BookingListQuery {
            player: Some("ruiz".into()),
            ..BookingListQuery::default()
        })
        .await
        .unwrap()
        .data
        .unwrap()
        .items;
    assert_eq!(by_player.len(), 1);
    assert_eq!(by_player[0].court_name, "Norte");
}
