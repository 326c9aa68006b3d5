//! Invoice layout: one invoice/client pair in, draw instructions out.
//!
//! Single page, top to bottom. The header, bill-to and closing blocks sit
//! at fixed coordinates; the line-items table, total and notes thread a
//! running vertical cursor, and the payment block floats below them with a
//! fixed floor. There is no pagination: content past the page bottom is
//! clipped by the one-page output.

use billsmith_billing::Invoice;
use billsmith_clients::Client;
use chrono::{DateTime, Utc};

use crate::error::{DocumentError, DocumentResult};
use crate::format::{format_date, format_money, format_quantity, format_total};
use crate::instruction::{Color, DrawInstruction, TextAlign};
use crate::page::PageMetrics;
use crate::profile::BrandProfile;
use crate::text::wrap_text;

const INK: Color = Color::rgb(0.13, 0.13, 0.13);
const MUTED: Color = Color::rgb(0.45, 0.45, 0.45);
const BAND_FILL: Color = Color::rgb(0.91, 0.91, 0.93);
const RULE: Color = Color::rgb(0.78, 0.78, 0.80);

const TITLE_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const SMALL_SIZE: f32 = 9.0;
const TOTAL_SIZE: f32 = 12.0;
const FOOTER_SIZE: f32 = 8.0;

const TITLE_Y: f32 = 50.0;
const COMPANY_TOP: f32 = 50.0;
const COMPANY_PITCH: f32 = 12.0;
const META_TOP: f32 = 108.0;
const META_PITCH: f32 = 14.0;
const BILL_TO_TOP: f32 = 180.0;
const BILL_TO_PITCH: f32 = 14.0;
const HEADING_BODY_GAP: f32 = 16.0;

const TABLE_TOP: f32 = 248.0;
const BAND_HEIGHT: f32 = 20.0;
const FIRST_ROW_GAP: f32 = 8.0;
const ROW_HEIGHT: f32 = 14.0;
const RULE_WIDTH: f32 = 0.5;

const COL_DESCRIPTION: f32 = 55.0;
const COL_QUANTITY: f32 = 300.0;
const COL_UNIT_PRICE: f32 = 370.0;
const COL_AMOUNT: f32 = 460.0;

const TOTAL_GAP: f32 = 10.0;
const NOTES_GAP: f32 = 24.0;
const NOTES_LINE_HEIGHT: f32 = 14.0;
const PAYMENT_GAP: f32 = 30.0;
const PAYMENT_MIN_Y: f32 = 600.0;
const PAYMENT_PITCH: f32 = 13.0;

/// Compute the full instruction sequence for one invoice document.
///
/// Pure: same inputs and `generated_at` produce the same instructions.
/// The cursor lives entirely on this call's stack, so concurrent layouts
/// never interact.
pub fn layout_invoice(
    invoice: &Invoice,
    client: &Client,
    profile: &BrandProfile,
    page: &PageMetrics,
    generated_at: DateTime<Utc>,
) -> DocumentResult<Vec<DrawInstruction>> {
    ensure_numeric_fields(invoice)?;

    let right = page.content_right();
    let mut out = Vec::new();

    // Title and company identity, fixed positions.
    out.push(DrawInstruction::text(
        "INVOICE",
        page.margin,
        TITLE_Y,
        TITLE_SIZE,
        INK,
        TextAlign::Left,
    ));
    out.push(DrawInstruction::text(
        profile.company_name.clone(),
        right,
        COMPANY_TOP,
        HEADING_SIZE,
        INK,
        TextAlign::Right,
    ));
    let mut company_y = COMPANY_TOP + HEADING_BODY_GAP;
    for address_line in &profile.address_lines {
        out.push(DrawInstruction::text(
            address_line.clone(),
            right,
            company_y,
            SMALL_SIZE,
            MUTED,
            TextAlign::Right,
        ));
        company_y += COMPANY_PITCH;
    }
    out.push(DrawInstruction::text(
        profile.contact_line.clone(),
        right,
        company_y,
        SMALL_SIZE,
        MUTED,
        TextAlign::Right,
    ));

    // Invoice metadata.
    let meta = [
        format!("Invoice #: {}", invoice.number),
        format!("Date: {}", format_date(invoice.created_at)),
        format!("Due Date: {}", format_date(invoice.due_date)),
        format!("Status: {}", invoice.status.as_str().to_uppercase()),
    ];
    for (index, line) in meta.into_iter().enumerate() {
        out.push(DrawInstruction::text(
            line,
            page.margin,
            META_TOP + index as f32 * META_PITCH,
            BODY_SIZE,
            INK,
            TextAlign::Left,
        ));
    }

    // Bill-to block. Absent fields still occupy their line, as blanks.
    out.push(DrawInstruction::text(
        "Bill To:",
        page.margin,
        BILL_TO_TOP,
        HEADING_SIZE,
        MUTED,
        TextAlign::Left,
    ));
    let bill_to = [
        client.display_name(),
        client.company.clone().unwrap_or_default(),
        client.email.clone().unwrap_or_default(),
    ];
    for (index, line) in bill_to.into_iter().enumerate() {
        out.push(DrawInstruction::text(
            line,
            page.margin,
            BILL_TO_TOP + HEADING_BODY_GAP + index as f32 * BILL_TO_PITCH,
            BODY_SIZE,
            INK,
            TextAlign::Left,
        ));
    }

    // Table header band with column captions.
    out.push(DrawInstruction::filled_rect(
        page.margin,
        TABLE_TOP,
        page.content_width(),
        BAND_HEIGHT,
        BAND_FILL,
    ));
    let caption_y = TABLE_TOP + 5.0;
    for (caption, x) in [
        ("Description", COL_DESCRIPTION),
        ("Quantity", COL_QUANTITY),
        ("Unit Price", COL_UNIT_PRICE),
        ("Amount", COL_AMOUNT),
    ] {
        out.push(DrawInstruction::text(
            caption,
            x,
            caption_y,
            BODY_SIZE,
            INK,
            TextAlign::Left,
        ));
    }

    // Table body. Rows separated by rules, except after the last row, which
    // closes with single spacing.
    let mut y_pos = TABLE_TOP + BAND_HEIGHT + FIRST_ROW_GAP;
    let item_count = invoice.items.len();
    for (index, item) in invoice.items.iter().enumerate() {
        out.push(DrawInstruction::text(
            item.description.clone(),
            COL_DESCRIPTION,
            y_pos,
            BODY_SIZE,
            INK,
            TextAlign::Left,
        ));
        out.push(DrawInstruction::text(
            format_quantity(item.quantity),
            COL_QUANTITY,
            y_pos,
            BODY_SIZE,
            INK,
            TextAlign::Left,
        ));
        out.push(DrawInstruction::text(
            format_money(item.unit_price),
            COL_UNIT_PRICE,
            y_pos,
            BODY_SIZE,
            INK,
            TextAlign::Left,
        ));
        out.push(DrawInstruction::text(
            format_money(item.amount),
            COL_AMOUNT,
            y_pos,
            BODY_SIZE,
            INK,
            TextAlign::Left,
        ));

        if index + 1 < item_count {
            y_pos += ROW_HEIGHT;
            out.push(DrawInstruction::line(
                page.margin, y_pos, right, y_pos, RULE_WIDTH, RULE,
            ));
        }
        y_pos += ROW_HEIGHT;
    }

    // Grand total, issued amount verbatim.
    y_pos += TOTAL_GAP;
    out.push(DrawInstruction::text(
        "Total:",
        COL_UNIT_PRICE,
        y_pos,
        TOTAL_SIZE,
        INK,
        TextAlign::Left,
    ));
    out.push(DrawInstruction::text(
        format_total(invoice.amount),
        right,
        y_pos,
        TOTAL_SIZE,
        INK,
        TextAlign::Right,
    ));

    // Notes, only when present after trimming.
    if let Some(notes) = invoice.notes_text() {
        y_pos += NOTES_GAP;
        out.push(DrawInstruction::text(
            "Notes:",
            page.margin,
            y_pos,
            HEADING_SIZE,
            MUTED,
            TextAlign::Left,
        ));
        y_pos += HEADING_BODY_GAP;
        for note_line in wrap_text(notes, BODY_SIZE, page.content_width()) {
            out.push(DrawInstruction::text(
                note_line,
                page.margin,
                y_pos,
                BODY_SIZE,
                INK,
                TextAlign::Left,
            ));
            y_pos += NOTES_LINE_HEIGHT;
        }
    }

    // Payment details float under the content but never above the floor.
    let payment_top = (y_pos + PAYMENT_GAP).max(PAYMENT_MIN_Y);
    out.push(DrawInstruction::text(
        "Payment Information",
        page.margin,
        payment_top,
        HEADING_SIZE,
        INK,
        TextAlign::Left,
    ));
    let payment_lines = [
        format!("Bank: {}", profile.bank_name),
        format!("Account Name: {}", profile.account_name),
        format!("Account #: {}", profile.account_number),
        format!("Routing #: {}", profile.routing_number),
    ];
    for (index, line) in payment_lines.into_iter().enumerate() {
        out.push(DrawInstruction::text(
            line,
            page.margin,
            payment_top + HEADING_BODY_GAP + index as f32 * PAYMENT_PITCH,
            SMALL_SIZE,
            INK,
            TextAlign::Left,
        ));
    }

    // Closing: thank-you and footer pinned to the page bottom.
    out.push(DrawInstruction::text(
        profile.thank_you_line.clone(),
        page.width / 2.0,
        page.content_bottom() - 20.0,
        BODY_SIZE,
        INK,
        TextAlign::Center,
    ));
    let footer_y = page.content_bottom() + 14.0;
    out.push(DrawInstruction::text(
        format!("Generated on {}", generated_at.format("%b %d, %Y %H:%M UTC")),
        page.margin,
        footer_y,
        FOOTER_SIZE,
        MUTED,
        TextAlign::Left,
    ));
    out.push(DrawInstruction::text(
        profile.copyright_line.clone(),
        page.width / 2.0,
        footer_y,
        FOOTER_SIZE,
        MUTED,
        TextAlign::Center,
    ));
    out.push(DrawInstruction::text(
        "Page 1 of 1",
        right,
        footer_y,
        FOOTER_SIZE,
        MUTED,
        TextAlign::Right,
    ));

    tracing::debug!(
        items = item_count,
        instructions = out.len(),
        "invoice layout complete"
    );
    Ok(out)
}

/// Reject records whose required numeric fields are not usable numbers.
///
/// Absent optional fields degrade gracefully elsewhere; this is the one
/// structural check the engine performs.
fn ensure_numeric_fields(invoice: &Invoice) -> DocumentResult<()> {
    ensure_number(invoice.amount, || "amount".to_string())?;
    for (index, item) in invoice.items.iter().enumerate() {
        ensure_number(item.quantity, || format!("items[{index}].quantity"))?;
        ensure_number(item.unit_price, || format!("items[{index}].unitPrice"))?;
        ensure_number(item.amount, || format!("items[{index}].amount"))?;
    }
    Ok(())
}

fn ensure_number(value: f64, field: impl Fn() -> String) -> DocumentResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DocumentError::malformed(format!(
            "{} is not a number",
            field()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billsmith_billing::{InvoiceId, InvoiceStatus, LineItem};
    use billsmith_clients::ClientId;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn item(description: &str, quantity: f64, unit_price: f64, amount: f64) -> LineItem {
        LineItem {
            description: description.to_string(),
            quantity,
            unit_price,
            amount,
        }
    }

    fn invoice_with(items: Vec<LineItem>, amount: f64, notes: Option<&str>) -> Invoice {
        Invoice {
            id: InvoiceId::new(),
            client_id: ClientId::new(),
            number: "INV-001".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            due_date: Utc.with_ymd_and_hms(2024, 1, 20, 0, 0, 0).unwrap(),
            status: InvoiceStatus::Sent,
            items,
            amount,
            notes: notes.map(str::to_string),
        }
    }

    fn sample_invoice() -> Invoice {
        invoice_with(
            vec![item("Design", 2.0, 50.0, 100.0)],
            100.0,
            Some("Thanks!"),
        )
    }

    fn jane() -> Client {
        Client {
            id: ClientId::new(),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@x.com".to_string()),
            company: Some("Acme Studios".to_string()),
        }
    }

    fn anonymous() -> Client {
        Client {
            id: ClientId::new(),
            first_name: None,
            last_name: None,
            email: None,
            company: None,
        }
    }

    fn layout(invoice: &Invoice, client: &Client) -> Vec<DrawInstruction> {
        layout_invoice(
            invoice,
            client,
            &BrandProfile::default(),
            &PageMetrics::default(),
            generated_at(),
        )
        .unwrap()
    }

    fn texts(instructions: &[DrawInstruction]) -> Vec<&str> {
        instructions
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    fn contains(instructions: &[DrawInstruction], needle: &str) -> bool {
        texts(instructions).iter().any(|t| t.contains(needle))
    }

    fn text_y(instructions: &[DrawInstruction], needle: &str) -> f32 {
        instructions
            .iter()
            .find_map(|i| match i {
                DrawInstruction::Text { content, y, .. } if content.contains(needle) => Some(*y),
                _ => None,
            })
            .unwrap_or_else(|| panic!("no text containing {needle:?}"))
    }

    fn separator_count(instructions: &[DrawInstruction]) -> usize {
        instructions
            .iter()
            .filter(|i| matches!(i, DrawInstruction::Line { .. }))
            .count()
    }

    #[test]
    fn end_to_end_scenario_renders_every_visible_field() {
        let out = layout(&sample_invoice(), &jane());

        for needle in [
            "INVOICE",
            "Invoice #: INV-001",
            "Date: Jan 05, 2024",
            "Due Date: Jan 20, 2024",
            "Status: SENT",
            "Jane Doe",
            "Design",
            "$50.00",
            "$100.00",
            "Total:",
            "$100",
            "Thanks!",
            "Page 1 of 1",
        ] {
            assert!(contains(&out, needle), "missing {needle:?}");
        }
        assert!(texts(&out).contains(&"2"), "quantity cell missing");
    }

    #[test]
    fn empty_items_keep_header_band_and_total() {
        let invoice = invoice_with(vec![], 250.0, None);
        let out = layout(&invoice, &jane());

        assert!(
            out.iter()
                .any(|i| matches!(i, DrawInstruction::FilledRect { .. })),
            "header band missing"
        );
        assert_eq!(separator_count(&out), 0);
        assert!(contains(&out, "Description"));
        assert!(contains(&out, "$250"), "total must come from the record");
    }

    #[test]
    fn single_row_has_no_separator() {
        let out = layout(&sample_invoice(), &jane());
        assert_eq!(separator_count(&out), 0);
    }

    #[test]
    fn separators_sit_between_rows_only() {
        let items = vec![
            item("Design", 2.0, 50.0, 100.0),
            item("Development", 10.0, 80.0, 800.0),
            item("Hosting", 1.0, 25.0, 25.0),
        ];
        let out = layout(&invoice_with(items, 925.0, None), &jane());
        assert_eq!(separator_count(&out), 2);
    }

    #[test]
    fn rows_between_separators_advance_by_double_pitch() {
        let items = vec![
            item("Design", 2.0, 50.0, 100.0),
            item("Development", 10.0, 80.0, 800.0),
        ];
        let out = layout(&invoice_with(items, 900.0, None), &jane());

        let first = text_y(&out, "Design");
        let second = text_y(&out, "Development");
        assert_eq!(second - first, 2.0 * ROW_HEIGHT);
    }

    #[test]
    fn total_uses_issued_amount_not_the_item_sum() {
        let invoice = invoice_with(vec![item("Design", 2.0, 50.0, 100.0)], 90.0, None);
        let out = layout(&invoice, &jane());
        assert!(contains(&out, "$90"), "adjusted total must pass through");
    }

    #[test]
    fn total_is_right_aligned_to_the_table_edge() {
        let out = layout(&sample_invoice(), &jane());
        let page = PageMetrics::default();

        let total = out
            .iter()
            .find_map(|i| match i {
                DrawInstruction::Text {
                    content, x, align, ..
                } if content == "$100" => Some((*x, *align)),
                _ => None,
            })
            .expect("total missing");
        assert_eq!(total, (page.content_right(), TextAlign::Right));
    }

    #[test]
    fn notes_render_after_the_total() {
        let out = layout(&sample_invoice(), &jane());
        assert!(text_y(&out, "Notes:") > text_y(&out, "Total:"));
        assert!(text_y(&out, "Thanks!") > text_y(&out, "Notes:"));
    }

    #[test]
    fn absent_or_blank_notes_render_no_heading() {
        for notes in [None, Some(""), Some("   "), Some("\n\t")] {
            let invoice = invoice_with(vec![item("Design", 2.0, 50.0, 100.0)], 100.0, notes);
            let out = layout(&invoice, &jane());
            assert!(!contains(&out, "Notes:"), "unexpected heading for {notes:?}");
        }
    }

    #[test]
    fn long_notes_wrap_within_the_table_width() {
        let notes = "Payment is due within fifteen days of the invoice date. \
                     A late fee of 1.5% per month applies to outstanding balances. \
                     Please reference the invoice number with your transfer.";
        let invoice = invoice_with(vec![item("Design", 2.0, 50.0, 100.0)], 100.0, Some(notes));
        let out = layout(&invoice, &jane());

        let page = PageMetrics::default();
        let heading_y = text_y(&out, "Notes:");
        let body_lines: Vec<_> = out
            .iter()
            .filter_map(|i| match i {
                DrawInstruction::Text { content, y, .. } if *y > heading_y && *y < PAYMENT_MIN_Y => {
                    Some(content.as_str())
                }
                _ => None,
            })
            .collect();
        assert!(body_lines.len() > 1, "expected wrapped note lines");
        for line in body_lines {
            assert!(crate::text::text_width(line, BODY_SIZE) <= page.content_width());
        }
    }

    #[test]
    fn payment_block_never_rises_above_the_floor() {
        let out = layout(&sample_invoice(), &jane());
        assert_eq!(text_y(&out, "Payment Information"), PAYMENT_MIN_Y);
    }

    #[test]
    fn payment_block_floats_below_long_content() {
        let items: Vec<_> = (0..15)
            .map(|n| item(&format!("Sprint {n}"), 1.0, 100.0, 100.0))
            .collect();
        let out = layout(&invoice_with(items, 1500.0, None), &jane());
        assert!(text_y(&out, "Payment Information") > PAYMENT_MIN_Y);
    }

    #[test]
    fn layout_is_deterministic_for_pinned_timestamp() {
        let invoice = sample_invoice();
        let client = jane();
        assert_eq!(layout(&invoice, &client), layout(&invoice, &client));
    }

    #[test]
    fn only_the_generated_footer_depends_on_the_clock() {
        let invoice = sample_invoice();
        let client = jane();
        let profile = BrandProfile::default();
        let page = PageMetrics::default();

        let morning = layout_invoice(
            &invoice,
            &client,
            &profile,
            &page,
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
        .unwrap();
        let evening = layout_invoice(
            &invoice,
            &client,
            &profile,
            &page,
            Utc.with_ymd_and_hms(2024, 3, 1, 21, 30, 0).unwrap(),
        )
        .unwrap();

        let strip = |instructions: &[DrawInstruction]| -> Vec<DrawInstruction> {
            instructions
                .iter()
                .filter(|i| {
                    !matches!(i, DrawInstruction::Text { content, .. }
                        if content.starts_with("Generated on"))
                })
                .cloned()
                .collect()
        };
        assert_ne!(morning, evening);
        assert_eq!(strip(&morning), strip(&evening));
    }

    #[test]
    fn anonymous_client_renders_blank_identity_lines() {
        let out = layout(&sample_invoice(), &anonymous());
        assert!(contains(&out, "Bill To:"));

        // The three identity slots are present and empty.
        let blank_lines = out
            .iter()
            .filter(|i| matches!(i, DrawInstruction::Text { content, .. } if content.is_empty()))
            .count();
        assert_eq!(blank_lines, 3);
    }

    #[test]
    fn empty_name_falls_back_to_email_on_the_document() {
        let client = Client {
            id: ClientId::new(),
            first_name: Some("".to_string()),
            last_name: Some("".to_string()),
            email: Some("x@y.com".to_string()),
            company: None,
        };
        let out = layout(&sample_invoice(), &client);
        let name_y = BILL_TO_TOP + HEADING_BODY_GAP;
        let name = out.iter().find_map(|i| match i {
            DrawInstruction::Text { content, y, .. } if *y == name_y => Some(content.clone()),
            _ => None,
        });
        assert_eq!(name.as_deref(), Some("x@y.com"));
    }

    #[test]
    fn fractional_quantities_print_their_native_form() {
        let invoice = invoice_with(vec![item("Retainer", 2.5, 100.0, 250.0)], 250.0, None);
        let out = layout(&invoice, &jane());
        assert!(texts(&out).contains(&"2.5"));
    }

    #[test]
    fn non_finite_amount_is_malformed_input() {
        let invoice = invoice_with(vec![], f64::NAN, None);
        let err = layout_invoice(
            &invoice,
            &jane(),
            &BrandProfile::default(),
            &PageMetrics::default(),
            generated_at(),
        )
        .unwrap_err();
        assert!(matches!(err, DocumentError::MalformedInput(msg) if msg.contains("amount")));
    }

    #[test]
    fn non_finite_item_field_names_the_offender() {
        let invoice = invoice_with(
            vec![
                item("Design", 2.0, 50.0, 100.0),
                item("Development", f64::INFINITY, 80.0, 800.0),
            ],
            900.0,
            None,
        );
        let err = layout_invoice(
            &invoice,
            &jane(),
            &BrandProfile::default(),
            &PageMetrics::default(),
            generated_at(),
        )
        .unwrap_err();
        assert!(
            matches!(err, DocumentError::MalformedInput(msg) if msg.contains("items[1].quantity"))
        );
    }

    #[test]
    fn custom_profile_replaces_the_letterhead() {
        let profile = BrandProfile {
            company_name: "Northlake Creative".to_string(),
            ..BrandProfile::default()
        };
        let out = layout_invoice(
            &sample_invoice(),
            &jane(),
            &profile,
            &PageMetrics::default(),
            generated_at(),
        )
        .unwrap();
        assert!(texts(&out).contains(&"Northlake Creative"));
        assert!(!texts(&out).contains(&"Brightpath Studio"));
    }

    proptest! {
        #[test]
        fn layout_never_panics_and_stays_within_horizontal_bounds(
            descriptions in proptest::collection::vec("[ -~]{0,60}", 0..12),
            quantity in 0.0f64..10_000.0,
            unit_price in 0.0f64..100_000.0,
            amount in 0.0f64..1_000_000.0,
            notes in proptest::option::of("[ -~]{0,400}"),
        ) {
            let items: Vec<_> = descriptions
                .iter()
                .map(|d| item(d, quantity, unit_price, quantity * unit_price))
                .collect();
            let invoice = invoice_with(items, amount, notes.as_deref());
            let page = PageMetrics::default();
            let out = layout_invoice(
                &invoice,
                &jane(),
                &BrandProfile::default(),
                &page,
                generated_at(),
            )
            .unwrap();

            for instruction in &out {
                match instruction {
                    DrawInstruction::Text { x, y, .. } => {
                        prop_assert!(*x >= 0.0 && *x <= page.width);
                        prop_assert!(*y >= 0.0);
                    }
                    DrawInstruction::Line { x1, x2, .. } => {
                        prop_assert!(*x1 >= 0.0 && *x2 <= page.width);
                    }
                    DrawInstruction::FilledRect { x, w, .. } => {
                        prop_assert!(*x >= 0.0 && x + w <= page.width);
                    }
                }
            }
        }
    }
}
