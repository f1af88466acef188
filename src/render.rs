//! # Receipt Renderer
//!
//! A pure projection from [`ReceiptData`] to a fixed-width text receipt.
//! No side effects, no mutation: the same document state always renders to
//! the same string.
//!
//! The generation date is an explicit argument so the output is fully
//! determined by its inputs (the receipt number and the "dibuat pada"
//! footer both derive from it).

use chrono::NaiveDate;

use crate::document::{ReceiptData, receipt_number};
use crate::format::{long_date, rupiah};
use crate::ledger::LineItem;
use crate::signature::{SignatureMethod, SignatureResult};

/// Receipt width in characters.
pub const LINE_WIDTH: usize = 48;

const ORG_NAME: &str = "PC Pemuda Persis Kab. Cianjur";
const TITLE: &str = "KUITANSI";
const CLOSING: &str = "\u{062C}\u{064E}\u{0632}\u{064E}\u{0627}\u{0643}\u{064E} \u{0627}\u{0644}\u{0644}\u{0647}\u{064F} \u{062E}\u{064E}\u{064A}\u{0652}\u{0631}";

/// Render the document as a fixed-width text receipt.
pub fn render_text(data: &ReceiptData, generated_on: NaiveDate) -> String {
    let mut out = String::new();
    let mut line = |s: String| {
        out.push_str(&s);
        out.push('\n');
    };

    // Header
    line(center(ORG_NAME));
    line(center(TITLE));
    line(center(&receipt_number(generated_on)));
    line(divider());

    // Identity block
    line(field("Diterima Oleh", &data.receiver));
    line(field("NPA Penerima", &data.receiver_npa));
    line(field("Dari", &data.from));
    line(field("NPA Pembayar", &data.from_npa));
    line(field("Tanggal Diterima", &long_date(data.date)));
    line(field("Metode Pembayaran", data.method.label()));
    line(divider());

    // Item table
    line("DETAIL PEMBAYARAN".to_string());
    line(columns("Deskripsi", "Harga"));
    line(divider());
    for item in data.items.items() {
        line(item_row(item));
    }
    line(divider());
    line(columns("Total", &rupiah(data.items.total())));

    // Note block
    if !data.note.trim().is_empty() {
        line(String::new());
        line("Catatan:".to_string());
        for note_line in data.note.lines() {
            line(note_line.to_string());
        }
    }

    // Signature block
    line(String::new());
    line(columns("Diterima Oleh", "Tanda Tangan Pembayar"));
    line(columns("", signature_tag(&data.payer_signature)));
    line(columns(&data.receiver, &data.from));
    line(columns(&data.receiver_npa, &data.from_npa));

    // Footer
    line(String::new());
    line(center(CLOSING));
    line(center(&format!(
        "Kuitansi ini dibuat pada {}",
        long_date(generated_on)
    )));

    out
}

/// One item row: description left, amount right. Quantities above one are
/// shown inline next to the description.
fn item_row(item: &LineItem) -> String {
    let description = if item.description.trim().is_empty() {
        "Item".to_string()
    } else {
        item.description.clone()
    };
    let left = if item.quantity > 1 {
        format!(
            "{} ({} x {})",
            description,
            item.quantity,
            rupiah(item.unit_price)
        )
    } else {
        description
    };
    columns(&left, &rupiah(item.amount))
}

fn signature_tag(signature: &SignatureResult) -> &'static str {
    match signature.method() {
        Some(SignatureMethod::Drawn) => "(ditandatangani - digambar)",
        Some(SignatureMethod::Uploaded) => "(ditandatangani - diunggah)",
        None => "(belum ditandatangani)",
    }
}

/// `Label : value` with the label column padded to a fixed width.
fn field(label: &str, value: &str) -> String {
    format!("{:<18}: {}", label, value)
}

/// Left and right text on one line, padded apart to [`LINE_WIDTH`].
fn columns(left: &str, right: &str) -> String {
    let used = left.chars().count() + right.chars().count();
    let padding = LINE_WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}", left, " ".repeat(padding), right)
}

fn center(text: &str) -> String {
    let width = text.chars().count();
    let padding = LINE_WIDTH.saturating_sub(width) / 2;
    format!("{}{}", " ".repeat(padding), text)
}

fn divider() -> String {
    "-".repeat(LINE_WIDTH)
}
