// ═══════════════════════════════════════════════════════════════════
// Service Tests — ValidationService rules, InventoryService mutations
// ═══════════════════════════════════════════════════════════════════

use stockflow_core::errors::CoreError;
use stockflow_core::models::payload::StockDataPayload;
use stockflow_core::models::settings::MarketSettings;
use stockflow_core::models::stock::{StockDraft, StockFields, StockId, StockItem};
use stockflow_core::models::violation::Violations;
use stockflow_core::services::inventory_service::InventoryService;
use stockflow_core::services::validation_service::ValidationService;

// ── Helpers ─────────────────────────────────────────────────────────

fn valid_draft() -> StockDraft {
    StockDraft::new(
        "Heavy-Duty Widgets",
        "150",
        "Industrial grade widgets for heavy machinery. Pack of 50.",
        "https://picsum.photos/seed/widgets/400/300",
    )
}

fn fields(name: &str, amount: i64) -> StockFields {
    StockFields {
        name: name.to_string(),
        amount,
        description: "A perfectly ordinary description.".to_string(),
        image_url: "https://example.com/item.png".to_string(),
    }
}

fn item(id: &str, name: &str) -> StockItem {
    StockItem::with_id(StockId::from(id), fields(name, 10))
}

fn violations(err: CoreError) -> Violations {
    match err {
        CoreError::Validation(v) => v,
        other => panic!("expected a validation error, got {other:?}"),
    }
}

// ═══════════════════════════════════════════════════════════════════
// Stock draft validation
// ═══════════════════════════════════════════════════════════════════

mod draft_validation {
    use super::*;

    #[test]
    fn valid_draft_produces_typed_fields() {
        let f = ValidationService::new().validate_draft(&valid_draft()).unwrap();
        assert_eq!(f.name, "Heavy-Duty Widgets");
        assert_eq!(f.amount, 150);
        assert_eq!(f.image_url, "https://picsum.photos/seed/widgets/400/300");
    }

    #[test]
    fn name_of_two_chars_is_accepted() {
        let mut d = valid_draft();
        d.name = "ab".into();
        assert!(ValidationService::new().validate_draft(&d).is_ok());
    }

    #[test]
    fn name_of_one_char_fails_on_name_only() {
        let mut d = valid_draft();
        d.name = "a".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(v.len(), 1);
        assert!(v.has_field("name"));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        let mut d = valid_draft();
        d.name = "é".into(); // 2 bytes, 1 char
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert!(v.has_field("name"));
    }

    #[test]
    fn amount_zero_fails() {
        let mut d = valid_draft();
        d.amount = "0".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(v.messages_for("amount"), vec!["Amount must be a positive number."]);
    }

    #[test]
    fn amount_negative_fails() {
        let mut d = valid_draft();
        d.amount = "-3".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert!(v.has_field("amount"));
    }

    #[test]
    fn amount_fraction_fails_as_non_integer() {
        let mut d = valid_draft();
        d.amount = "1.5".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(v.messages_for("amount"), vec!["Amount must be a whole number."]);
    }

    #[test]
    fn amount_negative_fraction_reports_both_problems() {
        let mut d = valid_draft();
        d.amount = "-1.5".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(v.messages_for("amount").len(), 2);
    }

    #[test]
    fn amount_text_fails_as_not_a_number() {
        let mut d = valid_draft();
        d.amount = "lots".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(v.messages_for("amount"), vec!["Amount must be a number."]);
    }

    #[test]
    fn amount_blank_counts_as_zero() {
        let mut d = valid_draft();
        d.amount = "  ".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(v.messages_for("amount"), vec!["Amount must be a positive number."]);
    }

    #[test]
    fn amount_is_trimmed_and_exponent_form_accepted() {
        let mut d = valid_draft();
        d.amount = " 1e3 ".into();
        let f = ValidationService::new().validate_draft(&d).unwrap();
        assert_eq!(f.amount, 1000);
    }

    #[test]
    fn amount_radix_literals_are_accepted() {
        for (raw, expected) in [("0x10", 16), ("0X1f", 31), ("0o17", 15), ("0b101", 5)] {
            let mut d = valid_draft();
            d.amount = raw.into();
            let f = ValidationService::new().validate_draft(&d).unwrap();
            assert_eq!(f.amount, expected, "{raw}");
        }
    }

    #[test]
    fn amount_malformed_radix_literals_are_not_numbers() {
        for raw in ["0x", "0xZZ", "-0x10", "0b102"] {
            let mut d = valid_draft();
            d.amount = raw.into();
            let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
            assert_eq!(v.messages_for("amount"), vec!["Amount must be a number."], "{raw}");
        }
    }

    #[test]
    fn amount_infinity_is_not_a_whole_number() {
        let mut d = valid_draft();
        d.amount = "Infinity".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(v.messages_for("amount"), vec!["Amount must be a whole number."]);

        d.amount = "-Infinity".into();
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(
            v.messages_for("amount"),
            vec!["Amount must be a whole number.", "Amount must be a positive number."]
        );
    }

    #[test]
    fn amount_rust_only_spellings_are_not_numbers() {
        for raw in ["inf", "infinity", "NaN"] {
            let mut d = valid_draft();
            d.amount = raw.into();
            let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
            assert_eq!(v.messages_for("amount"), vec!["Amount must be a number."], "{raw}");
        }
    }

    #[test]
    fn amount_one_is_accepted() {
        let mut d = valid_draft();
        d.amount = "1".into();
        assert_eq!(ValidationService::new().validate_draft(&d).unwrap().amount, 1);
    }

    #[test]
    fn description_boundaries() {
        let svc = ValidationService::new();
        for (len, ok) in [(9, false), (10, true), (200, true), (201, false)] {
            let mut d = valid_draft();
            d.description = "x".repeat(len);
            let res = svc.validate_draft(&d);
            assert_eq!(res.is_ok(), ok, "description of {len} chars");
            if let Err(e) = res {
                assert!(violations(e).has_field("description"));
            }
        }
    }

    #[test]
    fn description_too_long_message() {
        let mut d = valid_draft();
        d.description = "x".repeat(201);
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        assert_eq!(
            v.messages_for("description"),
            vec!["Description must not exceed 200 characters."]
        );
    }

    #[test]
    fn image_url_must_parse() {
        let svc = ValidationService::new();
        for bad in ["", "not a url", "picsum.photos/seed/x", "/relative/path.png", "mailto:someone@example.com"] {
            let mut d = valid_draft();
            d.image_url = bad.into();
            let v = violations(svc.validate_draft(&d).unwrap_err());
            assert!(v.has_field("imageUrl"), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn image_url_accepts_http_and_https() {
        let svc = ValidationService::new();
        for good in ["http://example.com/a.png", "https://cdn.example.org/img?id=3"] {
            let mut d = valid_draft();
            d.image_url = good.into();
            assert!(svc.validate_draft(&d).is_ok(), "{good:?} should be accepted");
        }
    }

    #[test]
    fn every_failing_field_is_reported() {
        let d = StockDraft::new("a", "x", "short", "nope");
        let v = violations(ValidationService::new().validate_draft(&d).unwrap_err());
        for field in ["name", "amount", "description", "imageUrl"] {
            assert!(v.has_field(field), "missing violation for {field}");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Typed item validation
// ═══════════════════════════════════════════════════════════════════

mod item_validation {
    use super::*;

    #[test]
    fn valid_item_passes() {
        assert!(ValidationService::new().validate_item(&item("1", "Gears")).is_ok());
    }

    #[test]
    fn zero_amount_fails() {
        let mut i = item("1", "Gears");
        i.amount = 0;
        let v = violations(ValidationService::new().validate_item(&i).unwrap_err());
        assert!(v.has_field("amount"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Market settings validation
// ═══════════════════════════════════════════════════════════════════

mod settings_validation {
    use super::*;

    #[test]
    fn default_settings_are_valid() {
        assert!(ValidationService::new()
            .validate_settings(&MarketSettings::default())
            .is_ok());
    }

    #[test]
    fn location_needs_three_chars() {
        let svc = ValidationService::new();
        assert!(svc.validate_settings(&MarketSettings::open("abc")).is_ok());
        let v = violations(svc.validate_settings(&MarketSettings::open("ab")).unwrap_err());
        assert!(v.has_field("marketLocation"));
    }

    #[test]
    fn open_market_without_reason_is_valid() {
        let s = MarketSettings {
            market_location: "Harbour Market".into(),
            market_status: true,
            closure_reason: None,
        };
        assert!(ValidationService::new().validate_settings(&s).is_ok());
    }

    #[test]
    fn open_market_ignores_short_reason() {
        let s = MarketSettings {
            market_location: "Harbour Market".into(),
            market_status: true,
            closure_reason: Some("x".into()),
        };
        assert!(ValidationService::new().validate_settings(&s).is_ok());
    }

    #[test]
    fn closed_market_without_reason_fails_on_closure_reason() {
        let s = MarketSettings {
            market_location: "Harbour Market".into(),
            market_status: false,
            closure_reason: None,
        };
        let v = violations(ValidationService::new().validate_settings(&s).unwrap_err());
        assert_eq!(v.len(), 1);
        assert!(v.has_field("closureReason"));
    }

    #[test]
    fn closed_market_reason_boundary() {
        let svc = ValidationService::new();
        let short = MarketSettings::closed("Harbour Market", "x".repeat(9));
        let exact = MarketSettings::closed("Harbour Market", "x".repeat(10));
        assert!(violations(svc.validate_settings(&short).unwrap_err()).has_field("closureReason"));
        assert!(svc.validate_settings(&exact).is_ok());
    }

    #[test]
    fn closed_market_with_empty_reason_fails() {
        let s = MarketSettings::closed("Harbour Market", "");
        assert!(ValidationService::new().validate_settings(&s).is_err());
    }
}

// ═══════════════════════════════════════════════════════════════════
// Payload validation
// ═══════════════════════════════════════════════════════════════════

mod payload_validation {
    use super::*;

    #[test]
    fn empty_default_payload_is_valid() {
        assert!(ValidationService::new()
            .validate_payload(&StockDataPayload::default())
            .is_ok());
    }

    #[test]
    fn violations_are_prefixed_with_their_path() {
        let mut bad = item("2", "x");
        bad.image_url = "nope".into();
        let payload = StockDataPayload::new(
            vec![item("1", "Gears"), bad],
            MarketSettings::closed("Harbour Market", "short"),
        );
        let v = violations(ValidationService::new().validate_payload(&payload).unwrap_err());
        assert!(v.has_field("stocks[1].name"));
        assert!(v.has_field("stocks[1].imageUrl"));
        assert!(v.has_field("marketSettings.closureReason"));
        assert!(!v.has_field("stocks[0].name"));
    }

    #[test]
    fn duplicate_ids_are_reported_on_the_second_occurrence() {
        let payload = StockDataPayload::new(
            vec![item("same", "Gears"), item("same", "Bolts")],
            MarketSettings::default(),
        );
        let v = violations(ValidationService::new().validate_payload(&payload).unwrap_err());
        assert_eq!(v.len(), 1);
        assert!(v.has_field("stocks[1].id"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Inventory mutations
// ═══════════════════════════════════════════════════════════════════

mod inventory {
    use super::*;

    fn sample() -> StockDataPayload {
        StockDataPayload::new(
            vec![item("a", "Alpha"), item("b", "Bravo"), item("c", "Charlie")],
            MarketSettings::default(),
        )
    }

    #[test]
    fn add_prepends_with_fresh_id() {
        let svc = InventoryService::new();
        let mut p = sample();
        let id = svc.add_item(&mut p, fields("Delta", 4));
        assert_eq!(p.stocks.len(), 4);
        assert_eq!(p.stocks[0].id, id);
        assert_eq!(p.stocks[0].name, "Delta");
        assert_eq!(p.stocks[1].id, StockId::from("a"));
    }

    #[test]
    fn add_assigns_distinct_ids() {
        let svc = InventoryService::new();
        let mut p = StockDataPayload::default();
        let a = svc.add_item(&mut p, fields("One", 1));
        let b = svc.add_item(&mut p, fields("Two", 2));
        assert_ne!(a, b);
    }

    #[test]
    fn add_then_remove_restores_previous_state() {
        let svc = InventoryService::new();
        let mut p = sample();
        let before = p.clone();
        let id = svc.add_item(&mut p, fields("Delta", 4));
        assert!(svc.remove_item(&mut p, &id));
        assert_eq!(p, before);
    }

    #[test]
    fn replace_keeps_position_and_other_items() {
        let svc = InventoryService::new();
        let mut p = sample();
        svc.replace_item(&mut p, &StockId::from("b"), fields("Bravo v2", 99))
            .unwrap();
        assert_eq!(p.stocks.len(), 3);
        assert_eq!(p.stocks[1].id, StockId::from("b"));
        assert_eq!(p.stocks[1].name, "Bravo v2");
        assert_eq!(p.stocks[1].amount, 99);
        assert_eq!(p.stocks[0], item("a", "Alpha"));
        assert_eq!(p.stocks[2], item("c", "Charlie"));
    }

    #[test]
    fn replace_unknown_id_is_not_found() {
        let svc = InventoryService::new();
        let mut p = sample();
        let err = svc
            .replace_item(&mut p, &StockId::from("zzz"), fields("Nope", 1))
            .unwrap_err();
        assert!(matches!(err, CoreError::ItemNotFound(id) if id == "zzz"));
        assert_eq!(p, sample());
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let svc = InventoryService::new();
        let mut p = sample();
        assert!(!svc.remove_item(&mut p, &StockId::from("zzz")));
        assert_eq!(p, sample());
    }

    #[test]
    fn remove_keeps_relative_order() {
        let svc = InventoryService::new();
        let mut p = sample();
        svc.remove_item(&mut p, &StockId::from("b"));
        let names: Vec<_> = p.stocks.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Charlie"]);
    }

    #[test]
    fn set_market_settings_replaces_record() {
        let svc = InventoryService::new();
        let mut p = sample();
        svc.set_market_settings(&mut p, MarketSettings::closed("Pier 9", "Renovation in progress"));
        assert!(!p.market_settings.is_open());
        assert_eq!(p.market_settings.market_location, "Pier 9");
    }
}
