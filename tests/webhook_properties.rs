//! Property tests for intent dispatch over an in-memory store.

use std::collections::BTreeMap;

use campus_webhook::intent::{dispatch, Intent, CHECK_CGPA, GET_SYLLABUS};
use campus_webhook::models::{CgpaRecord, SyllabusRecord};
use campus_webhook::store::MemoryStore;
use campus_webhook::{LookupKind, WebhookError};
use proptest::prelude::*;
use rust_decimal::Decimal;

// -- Strategy helpers --

fn arb_roll_no() -> impl Strategy<Value = String> {
    "[0-9]{2}[A-Z]{2}[0-9]{3}"
}

/// CGPA on a 0.00–10.00 scale with two decimal places.
fn arb_cgpa() -> impl Strategy<Value = Decimal> {
    (0i64..=1000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn arb_word() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,12}"
}

fn block_on<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
        .block_on(fut)
}

proptest! {
    #[test]
    fn stored_cgpa_is_embedded_verbatim(
        rows in prop::collection::btree_map(arb_roll_no(), arb_cgpa(), 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let store = MemoryStore::new();
        for (id, (roll_no, cgpa)) in rows.iter().enumerate() {
            store.insert_cgpa(CgpaRecord::new(id as i32 + 1, roll_no.clone(), *cgpa)).unwrap();
        }
        let (roll_no, cgpa) = rows.iter().nth(pick.index(rows.len())).unwrap();

        let resp = block_on(dispatch(&store, Intent::CheckCgpa { roll_no: Some(roll_no.clone()) }))
            .unwrap();
        prop_assert_eq!(resp.fulfillment_text, format!("Your CGPA is: {cgpa}"));
    }

    #[test]
    fn absent_roll_no_is_not_found(
        rows in prop::collection::btree_map(arb_roll_no(), arb_cgpa(), 0..20),
        probe in arb_roll_no(),
    ) {
        prop_assume!(!rows.contains_key(&probe));
        let store = MemoryStore::new();
        for (id, (roll_no, cgpa)) in rows.iter().enumerate() {
            store.insert_cgpa(CgpaRecord::new(id as i32 + 1, roll_no.clone(), *cgpa)).unwrap();
        }

        let err = block_on(dispatch(&store, Intent::CheckCgpa { roll_no: Some(probe) }))
            .unwrap_err();
        prop_assert!(matches!(err, WebhookError::NotFound(LookupKind::Cgpa)));
        prop_assert_eq!(err.detail(), "CGPA not found");
    }

    #[test]
    fn stored_syllabus_is_embedded(
        branch in arb_word(),
        semester in arb_word(),
        file in "[a-z0-9_]{1,16}\\.pdf",
    ) {
        let store = MemoryStore::new();
        store.insert_syllabus(SyllabusRecord::new(1, branch.clone(), semester.clone(), file.clone()))
            .unwrap();

        let resp = block_on(dispatch(
            &store,
            Intent::GetSyllabus { branch: Some(branch.clone()), semester: Some(semester.clone()) },
        ))
        .unwrap();
        prop_assert_eq!(
            resp.fulfillment_text,
            format!("Here is the syllabus for {branch}, {semester}: {file}")
        );
    }

    #[test]
    fn unrecognized_intent_is_bad_request(name in "\\PC{0,24}") {
        prop_assume!(name != CHECK_CGPA && name != GET_SYLLABUS);
        let intent = Intent::from_parts(&name, &BTreeMap::new());
        prop_assert_eq!(&intent, &Intent::Unknown(name.clone()));

        let err = block_on(dispatch(&MemoryStore::new(), intent)).unwrap_err();
        prop_assert_eq!(err.http_status(), 400);
        prop_assert_eq!(err.detail(), "Unknown intent");
    }
}
