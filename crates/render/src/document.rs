use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use siwaras_core::{DomainError, DomainResult};
use siwaras_receipt::Receipt;

/// Columns per rendered line.
pub const PAGE_WIDTH: usize = 72;
/// Lines per page; the footer always sits on the last line of the last page.
pub const PAGE_HEIGHT: usize = 48;

const TITLE: &str = "TANDA TERIMA BARANG KELUAR";
const LABEL_WIDTH: usize = 16;

// Inner widths of the line-item table cells. With borders and padding the
// five columns fill PAGE_WIDTH exactly.
const COL_NO: usize = 4;
const COL_CODE: usize = 10;
const COL_NAME: usize = 26;
const COL_UNIT: usize = 8;
const COL_QTY: usize = 8;

/// Institution block printed at the top of every document.
#[derive(Debug, Clone)]
pub struct Letterhead {
    pub institution: String,
    pub branch: String,
    pub system_name: String,
    pub city: String,
}

impl Default for Letterhead {
    fn default() -> Self {
        Self {
            institution: "UNIVERSITAS TERBUKA".to_string(),
            branch: "UPBJJ-UT PALANGKA RAYA".to_string(),
            system_name: "Sistem Inventori Wisuda & Rangkaian Sosprom (SIWARAS)".to_string(),
            city: "Palangka Raya".to_string(),
        }
    }
}

/// One fixed-height page of rendered text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    lines: Vec<String>,
}

impl Page {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// The rendered document, ready for printing or download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pages: Vec<Page>,
}

impl RenderedDocument {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                out.push('\x0c');
            }
            for line in &page.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// Render a finalized receipt.
///
/// A draft cannot be rendered; it has to be finalized first so the document
/// reflects deducted stock. `printed_at` is passed in rather than read from
/// the clock, which keeps the output byte-stable.
pub fn render_receipt(
    receipt: &Receipt,
    letterhead: &Letterhead,
    printed_at: NaiveDateTime,
) -> DomainResult<RenderedDocument> {
    if receipt.is_draft() {
        return Err(DomainError::invalid_state(format!(
            "cannot render receipt {}: still a draft",
            receipt.id()
        )));
    }

    let mut body = Vec::new();

    // Letterhead and separator.
    body.push(letterhead.institution.clone());
    body.push(letterhead.branch.clone());
    body.push(letterhead.system_name.clone());
    body.push("=".repeat(PAGE_WIDTH));
    body.push(String::new());
    body.push(center(TITLE));
    body.push(String::new());

    // Document metadata.
    push_labeled(&mut body, "ID Tanda Terima", receipt.id().as_str());
    push_labeled(&mut body, "Tanggal", &long_date(receipt.date()));
    push_labeled(&mut body, "Keterangan", receipt.description());
    push_labeled(&mut body, "Status", "Selesai");
    body.push(String::new());

    // Line items.
    body.push("Daftar Barang:".to_string());
    body.push(table_rule());
    body.push(table_row(&["No", "Kode", "Nama Barang", "Satuan", "Jumlah"]));
    body.push(table_rule());
    for (index, line) in receipt.line_items().iter().enumerate() {
        let number = (index + 1).to_string();
        let quantity = line.quantity.to_string();
        let name_lines = wrap(&line.item_name, COL_NAME);
        for (row, name) in name_lines.iter().enumerate() {
            if row == 0 {
                body.push(table_row(&[
                    &number,
                    line.item_code.as_str(),
                    name,
                    &line.unit,
                    &quantity,
                ]));
            } else {
                body.push(table_row(&["", "", name, "", ""]));
            }
        }
    }
    body.push(table_rule());
    body.push(String::new());

    // Recipient.
    let recipient = receipt.recipient();
    body.push("Data Penerima:".to_string());
    push_labeled(&mut body, "Nama", &recipient.name);
    push_labeled(&mut body, "NIP/NIM", &recipient.id_number);
    push_labeled(&mut body, "Keterangan", &recipient.note);
    body.push(String::new());

    let signature = signature_block(letterhead, receipt, printed_at.date());
    let footer = center(&format!(
        "Dokumen ini dicetak otomatis oleh SIWARAS UT pada {} {:02}:{:02}",
        long_date(printed_at.date()),
        printed_at.hour(),
        printed_at.minute(),
    ));

    Ok(paginate(body, signature, footer))
}

fn push_labeled(body: &mut Vec<String>, label: &str, value: &str) {
    let value = if value.trim().is_empty() { "-" } else { value };
    let wrapped = wrap(value, PAGE_WIDTH - LABEL_WIDTH - 2);
    for (index, part) in wrapped.iter().enumerate() {
        if index == 0 {
            body.push(format!("{label:<LABEL_WIDTH$}: {part}"));
        } else {
            body.push(format!("{:<LABEL_WIDTH$}  {part}", ""));
        }
    }
}

fn signature_block(letterhead: &Letterhead, receipt: &Receipt, printed_on: NaiveDate) -> Vec<String> {
    let col = PAGE_WIDTH / 2;
    let two = |left: &str, right: &str| format!("{:<col$}{right}", format!("     {left}"));

    let mut block = vec![
        format!("{}, {}", letterhead.city, long_date(printed_on)),
        String::new(),
        two("Yang Menyerahkan,", "Yang Menerima,"),
        String::new(),
        String::new(),
        String::new(),
        two("__________________", "__________________"),
        two(receipt.created_by(), &receipt.recipient().name),
    ];
    for line in &mut block {
        truncate_to_width(line);
    }
    block
}

fn paginate(body: Vec<String>, signature: Vec<String>, footer: String) -> RenderedDocument {
    let mut pages: Vec<Page> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for line in body {
        if current.len() == PAGE_HEIGHT {
            pages.push(Page { lines: std::mem::take(&mut current) });
        }
        current.push(line);
    }

    // Signature and footer stay together at the bottom of the final page.
    let tail = signature.len() + 2;
    if current.len() + tail > PAGE_HEIGHT {
        while current.len() < PAGE_HEIGHT {
            current.push(String::new());
        }
        pages.push(Page { lines: std::mem::take(&mut current) });
    }
    while current.len() < PAGE_HEIGHT - tail {
        current.push(String::new());
    }
    current.extend(signature);
    current.push(String::new());
    current.push(footer);
    pages.push(Page { lines: current });

    RenderedDocument { pages }
}

fn center(text: &str) -> String {
    if text.len() >= PAGE_WIDTH {
        return text.to_string();
    }
    let pad = (PAGE_WIDTH - text.len()) / 2;
    format!("{:pad$}{text}", "")
}

fn truncate_to_width(line: &mut String) {
    if line.chars().count() > PAGE_WIDTH {
        *line = line.chars().take(PAGE_WIDTH).collect();
    }
}

/// Greedy word wrap; a word longer than the width is split hard.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word = word.to_string();
        while word.chars().count() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(width).collect();
            word = word.chars().skip(width).collect();
            lines.push(head);
        }
        let needed = word.chars().count() + if current.is_empty() { 0 } else { 1 };
        if current.chars().count() + needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn table_rule() -> String {
    format!(
        "+{}+{}+{}+{}+{}+",
        "-".repeat(COL_NO + 2),
        "-".repeat(COL_CODE + 2),
        "-".repeat(COL_NAME + 2),
        "-".repeat(COL_UNIT + 2),
        "-".repeat(COL_QTY + 2),
    )
}

fn table_row(cells: &[&str; 5]) -> String {
    format!(
        "| {:^COL_NO$} | {:^COL_CODE$} | {:<COL_NAME$} | {:^COL_UNIT$} | {:^COL_QTY$} |",
        clip(cells[0], COL_NO),
        clip(cells[1], COL_CODE),
        clip(cells[2], COL_NAME),
        clip(cells[3], COL_UNIT),
        clip(cells[4], COL_QTY),
    )
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

fn long_date(date: NaiveDate) -> String {
    const MONTHS: [&str; 12] = [
        "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
        "Oktober", "November", "Desember",
    ];
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use siwaras_catalog::ItemSnapshot;
    use siwaras_core::{ItemCode, ReceiptId};
    use siwaras_receipt::RecipientField;

    fn snapshot(code: &str, name: &str, stock: i64) -> ItemSnapshot {
        ItemSnapshot {
            code: ItemCode::new(code).unwrap(),
            name: name.to_string(),
            unit: "pcs".to_string(),
            stock,
        }
    }

    fn finalized_receipt() -> Receipt {
        let mut receipt = Receipt::new(
            ReceiptId::new("TT-003"),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            "Perlengkapan wisuda periode I",
            "admin1",
        );
        receipt
            .add_line_item(&snapshot("A001", "Toga Wisuda", 50), 12)
            .unwrap();
        receipt
            .add_line_item(&snapshot("A002", "Map Ijazah", 100), 30)
            .unwrap();
        receipt
            .update_recipient_field(RecipientField::Name, "Budi Santoso")
            .unwrap();
        receipt
            .update_recipient_field(RecipientField::IdNumber, "19870101")
            .unwrap();
        receipt.mark_finalized().unwrap();
        receipt
    }

    fn printed_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 11)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    #[test]
    fn draft_cannot_be_rendered() {
        let receipt = Receipt::new(
            ReceiptId::new("TT-001"),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            "x",
            "admin1",
        );
        let err = render_receipt(&receipt, &Letterhead::default(), printed_at()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidState(_)));
    }

    #[test]
    fn rendered_document_contains_expected_sections() {
        let doc =
            render_receipt(&finalized_receipt(), &Letterhead::default(), printed_at()).unwrap();
        let text = doc.to_text();

        assert!(text.contains("UNIVERSITAS TERBUKA"));
        assert!(text.contains("TANDA TERIMA BARANG KELUAR"));
        assert!(text.contains("ID Tanda Terima : TT-003"));
        assert!(text.contains("10 Maret 2025"));
        assert!(text.contains("Toga Wisuda"));
        assert!(text.contains("Map Ijazah"));
        assert!(text.contains("Budi Santoso"));
        assert!(text.contains("Yang Menyerahkan,"));
        assert!(text.contains("Yang Menerima,"));
        assert!(text.contains("dicetak otomatis oleh SIWARAS UT pada 11 Maret 2025 14:30"));
    }

    #[test]
    fn every_line_fits_the_page_width() {
        let doc =
            render_receipt(&finalized_receipt(), &Letterhead::default(), printed_at()).unwrap();
        for page in doc.pages() {
            assert_eq!(page.lines().len(), PAGE_HEIGHT);
            for line in page.lines() {
                assert!(line.chars().count() <= PAGE_WIDTH, "too wide: {line:?}");
            }
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let receipt = finalized_receipt();
        let a = render_receipt(&receipt, &Letterhead::default(), printed_at()).unwrap();
        let b = render_receipt(&receipt, &Letterhead::default(), printed_at()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn long_item_name_wraps_inside_its_column() {
        let mut receipt = Receipt::new(
            ReceiptId::new("TT-009"),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            "Sosialisasi promosi daerah",
            "admin2",
        );
        receipt
            .add_line_item(
                &snapshot(
                    "B010",
                    "Spanduk sosialisasi penerimaan mahasiswa baru jalur RPL tahun ajaran",
                    5,
                ),
                2,
            )
            .unwrap();
        receipt
            .update_recipient_field(RecipientField::Name, "Siti Rahma")
            .unwrap();
        receipt
            .update_recipient_field(RecipientField::IdNumber, "19900202")
            .unwrap();
        receipt.mark_finalized().unwrap();

        let doc = render_receipt(&receipt, &Letterhead::default(), printed_at()).unwrap();
        let text = doc.to_text();
        let wrapped_rows = text
            .lines()
            .filter(|line| line.starts_with("| ") && line.contains("Spanduk") || line.contains("jalur"))
            .count();
        assert!(wrapped_rows >= 2, "expected a wrapped table row:\n{text}");
        for line in text.lines() {
            assert!(line.chars().count() <= PAGE_WIDTH);
        }
    }

    #[test]
    fn footer_sits_on_the_last_line() {
        let doc =
            render_receipt(&finalized_receipt(), &Letterhead::default(), printed_at()).unwrap();
        let last_page = doc.pages().last().unwrap();
        let last_line = last_page.lines().last().unwrap();
        assert!(last_line.contains("dicetak otomatis"));
    }
}
