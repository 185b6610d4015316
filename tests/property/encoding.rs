//! Property-based ESC/POS encoding tests.
//!
//! Uses proptest to verify:
//! 1. Every text line encodes to exactly one byte per character plus LF.
//! 2. Encoded text never contains printer control bytes.
//! 3. Print lists survive a JSON round trip with snapshot field names.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use taskslip_proto::escpos;
use taskslip_proto::print::{PrintItem, PrintList};
use taskslip_proto::receipt::ReceiptCommand;

fn arb_print_item() -> impl Strategy<Value = PrintItem> {
    (".{0,64}", any::<bool>()).prop_map(|(task, evaluate)| PrintItem::new(task, evaluate))
}

proptest! {
    #[test]
    fn line_is_one_byte_per_char(text in ".{0,128}") {
        let bytes = escpos::line(&text);
        prop_assert_eq!(bytes.len(), text.chars().count() + 1);
        prop_assert_eq!(bytes.last().copied(), Some(b'\n'));
    }

    #[test]
    fn text_never_injects_control_bytes(text in "\\PC{0,64}|[\\x00-\\x1f]{1,8}") {
        let bytes = escpos::line(&text);
        let body = &bytes[..bytes.len() - 1];
        prop_assert!(body.iter().all(|&b| b >= 0x20));
    }

    #[test]
    fn encode_is_preamble_plus_parts(lines in prop::collection::vec(".{0,32}", 0..8)) {
        let commands: Vec<ReceiptCommand> =
            lines.iter().map(|l| ReceiptCommand::line(l.as_str())).collect();
        let encoded = escpos::encode(&commands);

        let mut expected = Vec::new();
        expected.extend_from_slice(&escpos::init());
        expected.extend_from_slice(&escpos::select_code_page());
        for l in &lines {
            expected.extend(escpos::line(l));
        }
        prop_assert_eq!(encoded, expected);
    }

    #[test]
    fn print_list_json_round_trip(items in prop::collection::vec(arb_print_item(), 0..16)) {
        let list: PrintList = items.into();
        let json = serde_json::to_string(&list).unwrap();
        let decoded: PrintList = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(list, decoded);
    }
}
