//! End-to-end tests for the receipt editing flow: ledger consistency,
//! signature capture, rendering, and host facility delegation.

use chrono::NaiveDate;
use pretty_assertions::assert_eq;

use kuitansi::KuitansiError;
use kuitansi::document::DetailsUpdate;
use kuitansi::ledger::{ItemUpdate, SequentialSource};
use kuitansi::session::{NoticeKind, PrintFacility, ReceiptSession, ShareFacility};
use kuitansi::signature::{Point, SignatureMethod, SignatureResult};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 7).unwrap()
}

fn session() -> ReceiptSession {
    ReceiptSession::new(Box::new(SequentialSource::default()), today())
}

fn complete_details(session: &mut ReceiptSession) {
    session.update_details(DetailsUpdate {
        from: Some("Budi Santoso".into()),
        receiver: Some("Sari Dewi".into()),
        receiver_npa: Some("24.0093".into()),
        ..Default::default()
    });
}

// ── Ledger properties ───────────────────────────────────────────────────

#[test]
fn three_items_priced_total_six_thousand() {
    let mut session = session();
    assert_eq!(session.data().items.len(), 1);
    assert_eq!(session.total(), 0.0);

    session.add_item();
    session.add_item();
    assert_eq!(session.data().items.len(), 3);
    assert_eq!(session.total(), 0.0);

    let ids: Vec<_> = session.data().items.items().iter().map(|i| i.id).collect();
    for (id, price) in ids.into_iter().zip([1000.0, 2000.0, 3000.0]) {
        session.update_item(id, ItemUpdate::UnitPrice(price)).unwrap();
    }
    assert_eq!(session.total(), 6000.0);
}

#[test]
fn quantity_updates_amount_without_touching_price() {
    let mut session = session();
    let id = session.data().items.items()[0].id;

    session.update_item(id, ItemUpdate::UnitPrice(1500.0)).unwrap();
    session.update_item(id, ItemUpdate::Quantity(3)).unwrap();
    assert_eq!(session.data().items.get(id).unwrap().amount, 4500.0);

    session.update_item(id, ItemUpdate::Quantity(5)).unwrap();
    let item = session.data().items.get(id).unwrap();
    assert_eq!(item.unit_price, 1500.0);
    assert_eq!(item.amount, 7500.0);
}

#[test]
fn ledger_never_observably_inconsistent() {
    let mut session = session();
    let first = session.data().items.items()[0].id;
    let second = session.add_item();
    let third = session.add_item();

    let steps: Vec<Box<dyn Fn(&mut ReceiptSession)>> = vec![
        Box::new(move |s| s.update_item(first, ItemUpdate::UnitPrice(125.0)).unwrap()),
        Box::new(move |s| s.update_item(second, ItemUpdate::Quantity(4)).unwrap()),
        Box::new(move |s| s.update_item(second, ItemUpdate::UnitPrice(50.0)).unwrap()),
        Box::new(move |s| {
            s.update_item(third, ItemUpdate::Description("Lainnya".into()))
                .unwrap()
        }),
        Box::new(move |s| s.remove_item(first).unwrap()),
        Box::new(|s| {
            s.add_item();
        }),
    ];

    for step in steps {
        step(&mut session);
        let items = session.data().items.items();
        for item in items {
            assert_eq!(item.amount, item.unit_price * item.quantity as f64);
        }
        let expected: f64 = items.iter().map(|i| i.amount).sum();
        assert_eq!(session.total(), expected);
    }
}

#[test]
fn removing_the_last_item_is_rejected_and_state_unchanged() {
    let mut session = session();
    let id = session.data().items.items()[0].id;
    session.update_item(id, ItemUpdate::UnitPrice(500.0)).unwrap();
    let before = session.data().clone();

    let err = session.remove_item(id).unwrap_err();
    assert!(matches!(err, KuitansiError::LastItem));
    assert_eq!(session.data(), &before);
}

// ── Signature properties ────────────────────────────────────────────────

#[test]
fn gesture_then_clear_cycles_the_signature() {
    let mut session = session();

    session
        .apply_gesture(&[Point::new(10.0, 10.0), Point::new(50.0, 50.0)])
        .unwrap();
    assert!(session.data().payer_signature.is_present());
    assert_eq!(
        session.data().payer_signature.method(),
        Some(SignatureMethod::Drawn)
    );

    session.clear_signature();
    assert_eq!(session.data().payer_signature, SignatureResult::None);
}

#[test]
fn strokes_accumulate_until_cleared() {
    let mut session = session();

    session
        .apply_gesture(&[Point::new(10.0, 10.0), Point::new(50.0, 50.0)])
        .unwrap();
    session
        .apply_gesture(&[Point::new(120.0, 20.0), Point::new(160.0, 20.0)])
        .unwrap();

    let SignatureResult::Image { data_uri, .. } = &session.data().payer_signature else {
        panic!("signature should be present");
    };

    // Decode the exported PNG and check ink from both gestures.
    let base64_part = data_uri.strip_prefix("data:image/png;base64,").unwrap();
    use base64::Engine as _;
    let png = base64::engine::general_purpose::STANDARD
        .decode(base64_part)
        .unwrap();
    let img = image::load_from_memory(&png).unwrap().to_luma8();
    assert!(img.get_pixel(30, 30).0[0] < 128, "first stroke present");
    assert!(img.get_pixel(140, 20).0[0] < 128, "second stroke present");
}

#[test]
fn uploaded_signature_wins_over_drawn() {
    let mut session = session();
    session
        .apply_gesture(&[Point::new(10.0, 10.0), Point::new(50.0, 50.0)])
        .unwrap();

    let png = kuitansi::SignaturePad::new(8, 8).export().unwrap().png;
    session.apply_uploaded_signature(&png, "image/png").unwrap();
    assert_eq!(
        session.data().payer_signature.method(),
        Some(SignatureMethod::Uploaded)
    );
}

// ── Rendering ───────────────────────────────────────────────────────────

#[test]
fn preview_reflects_items_signature_and_total() {
    let mut session = session();
    complete_details(&mut session);

    let first = session.data().items.items()[0].id;
    session
        .update_item(first, ItemUpdate::Description("Iuran tahunan".into()))
        .unwrap();
    session
        .update_item(first, ItemUpdate::UnitPrice(150_000.0))
        .unwrap();
    let second = session.add_item();
    session
        .update_item(second, ItemUpdate::Description("Infak".into()))
        .unwrap();
    session
        .update_item(second, ItemUpdate::UnitPrice(50_000.0))
        .unwrap();
    session
        .apply_gesture(&[Point::new(10.0, 10.0), Point::new(50.0, 50.0)])
        .unwrap();

    let text = session.preview(today()).unwrap();
    assert!(text.contains("BEND-20260807-001"));
    assert!(text.contains("Iuran tahunan"));
    assert!(text.contains("Infak"));
    assert!(text.contains("Rp 200.000"));
    assert!(text.contains("(ditandatangani - digambar)"));
    assert!(text.contains("Budi Santoso"));
}

#[test]
fn preview_rejects_incomplete_documents() {
    let session = session();
    let err = session.preview(today()).unwrap_err();
    assert!(matches!(err, KuitansiError::Incomplete(_)));
}

// ── Host facilities ─────────────────────────────────────────────────────

struct UnsupportedShare;

impl ShareFacility for UnsupportedShare {
    fn is_supported(&self) -> bool {
        false
    }

    fn share(&mut self, _title: &str, _text: &str) -> Result<(), KuitansiError> {
        Err(KuitansiError::ShareUnsupported)
    }
}

struct OkPrint;

impl PrintFacility for OkPrint {
    fn print(&mut self) -> Result<(), KuitansiError> {
        Ok(())
    }
}

#[test]
fn unsupported_share_notifies_without_panicking() {
    let mut session = session();
    complete_details(&mut session);
    let before = session.data().clone();

    let notice = session.share(&mut UnsupportedShare);
    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.title, "Berbagi Tidak Didukung");
    assert_eq!(session.data(), &before);
}

#[test]
fn print_reports_and_leaves_state_alone() {
    let mut session = session();
    complete_details(&mut session);
    let before = session.data().clone();

    let notice = session.print(&mut OkPrint);
    assert_eq!(notice.kind, NoticeKind::Info);
    assert!(!session.print_mode());
    assert_eq!(session.data(), &before);
}
