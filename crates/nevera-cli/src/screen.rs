// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Plain-text rendering of the inventory view and reminder digests. All
//! layout decisions live here; the domain crate stays presentation-free.

use anyhow::Result;
use nevera_api::Client;
use nevera_app::dates;
use nevera_app::model::{InventoryRecord, ProductCandidate, ViewParameters};
use nevera_app::reminder::{RefrigeratorMember, StockContext, build_reminder_digests};
use nevera_app::view::{ViewOutcome, compute_view};
use nevera_app::{Pagination, page_slice};
use time::Date;

/// Fetches one refrigerator's inventory and computes the view over it.
pub fn fetch_view(
    client: &Client,
    refrigerator_id: &str,
    params: &ViewParameters,
    today: Date,
) -> Result<ViewOutcome> {
    let records = client.list_items(refrigerator_id)?;
    log::debug!(
        "fetched {} record(s) for refrigerator {refrigerator_id}",
        records.len()
    );
    Ok(compute_view(&records, params, today))
}

pub fn render_inventory(outcome: &ViewOutcome, params: &ViewParameters, today: Date) -> String {
    let mut out = String::new();

    if outcome.rows.is_empty() {
        if params.search_text.is_empty() {
            out.push_str("no inventory to show\n");
        } else {
            out.push_str("no inventory matches the search\n");
        }
        return out;
    }

    out.push_str(&format!("{} item(s)\n", outcome.rows.len()));
    for row in &outcome.rows {
        let expiry = dates::format_for_display(&row.expiry_date);
        let expiry = if expiry.is_empty() {
            "no date".to_owned()
        } else {
            expiry
        };
        let marker = if row.is_expired(today) {
            "  [expired]"
        } else {
            ""
        };
        out.push_str(&format!(
            "  {}  exp {}{}  ({})\n",
            row.name,
            expiry,
            marker,
            row.display_category(),
        ));
    }

    let degraded = outcome.diagnostics.degraded_expiry_dates
        + outcome.diagnostics.degraded_created_stamps;
    if degraded > 0 {
        out.push_str(&format!("note: {degraded} record(s) had unreadable dates\n"));
    }
    if outcome.diagnostics.range_filter_skipped {
        out.push_str("note: expiry range ignored (start is after end)\n");
    }

    out
}

pub fn render_candidates(candidates: &[ProductCandidate], page: usize) -> String {
    if candidates.is_empty() {
        return "no products found\n".to_owned();
    }

    let pagination = Pagination::new(candidates.len());
    let page = pagination.clamp_page(page);
    let mut out = format!("{} result(s)\n", candidates.len());
    for candidate in page_slice(candidates, page) {
        match candidate.identity_code() {
            Some(code) => out.push_str(&format!("  {}  [{}]\n", candidate.name, code)),
            None => out.push_str(&format!("  {}\n", candidate.name)),
        }
    }
    if pagination.page_count() > 1 {
        out.push_str(&format!("page {} / {}\n", page, pagination.page_count()));
    }
    out
}

/// Wraps fetched items with the refrigerator and recipient context the
/// digest builder wants. The plain items endpoint carries no membership
/// data, so the configured recipient stands in for the member list.
pub fn stocks_for_recipient(
    records: Vec<InventoryRecord>,
    refrigerator_name: &str,
    recipient: &RefrigeratorMember,
) -> Vec<StockContext> {
    records
        .into_iter()
        .map(|record| StockContext {
            record,
            refrigerator_name: refrigerator_name.to_owned(),
            members: vec![recipient.clone()],
        })
        .collect()
}

/// Builds and renders the reminder digests in the mock-delivery format.
pub fn render_reminders(stocks: &[StockContext], today: Date) -> String {
    let digests = build_reminder_digests(stocks, today);
    if digests.is_empty() {
        return "no items expiring tomorrow\n".to_owned();
    }

    let mut out = String::new();
    for digest in &digests {
        out.push_str(&digest.render_text());
        out.push_str("--------------------------------------------------\n");
    }
    out.push_str(&format!("{} reminder(s) prepared\n", digests.len()));
    out
}

#[cfg(test)]
mod tests {
    use super::{
        fetch_view, render_candidates, render_inventory, render_reminders, stocks_for_recipient,
    };
    use anyhow::{Result, anyhow};
    use nevera_api::Client;
    use nevera_app::model::{FilterOption, ViewParameters};
    use nevera_app::reminder::RefrigeratorMember;
    use nevera_app::view::compute_view;
    use nevera_testkit::{
        sample_inventory, sample_search_results, sample_stocks, sample_today,
    };
    use std::thread;
    use std::time::Duration;
    use tiny_http::{Header, Response, Server};

    #[test]
    fn inventory_rendering_marks_expired_rows_and_degraded_dates() {
        let outcome = compute_view(
            &sample_inventory(),
            &ViewParameters::default(),
            sample_today(),
        );
        let text = render_inventory(&outcome, &ViewParameters::default(), sample_today());

        assert!(text.starts_with("10 item(s)\n"));
        assert!(text.contains("[expired]"));
        assert!(text.contains("exp 2024/06/"));
        assert!(text.contains("no date"));
        assert!(text.contains("unreadable dates"));
    }

    #[test]
    fn empty_view_message_depends_on_the_search() {
        let params = ViewParameters::default();
        let outcome = compute_view(&[], &params, sample_today());
        assert_eq!(
            render_inventory(&outcome, &params, sample_today()),
            "no inventory to show\n"
        );

        let params = ViewParameters {
            search_text: "durian".to_owned(),
            ..ViewParameters::default()
        };
        let outcome = compute_view(&sample_inventory(), &params, sample_today());
        assert_eq!(
            render_inventory(&outcome, &params, sample_today()),
            "no inventory matches the search\n"
        );
    }

    #[test]
    fn candidate_rendering_shows_codes_and_paging() {
        let unique = nevera_app::dedupe_candidates(&sample_search_results());
        let text = render_candidates(&unique, 1);
        assert!(text.starts_with("4 result(s)\n"));
        assert!(text.contains("[4901234500017]"));
        // A single page renders no pager line.
        assert!(!text.contains("page 1"));

        assert_eq!(render_candidates(&[], 1), "no products found\n");
    }

    #[test]
    fn reminders_render_in_the_mock_delivery_format() {
        let text = render_reminders(&sample_stocks(), sample_today());
        assert!(text.contains("Subject: items expiring tomorrow"));
        assert!(text.contains("3 reminder(s) prepared"));

        let none = render_reminders(&[], sample_today());
        assert_eq!(none, "no items expiring tomorrow\n");
    }

    #[test]
    fn recipient_stocks_attach_the_single_configured_member() {
        let recipient = RefrigeratorMember {
            user_id: "local".to_owned(),
            display_name: "member".to_owned(),
        };
        let stocks = stocks_for_recipient(sample_inventory(), "Kitchen", &recipient);
        assert!(!stocks.is_empty());
        assert!(stocks.iter().all(|stock| {
            stock.refrigerator_name == "Kitchen"
                && stock.members.len() == 1
                && stock.members[0].user_id == "local"
        }));
    }

    #[test]
    fn fetch_view_computes_over_the_fetched_snapshot() -> Result<()> {
        let server =
            Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
        let addr = format!("http://{}", server.server_addr());

        let handle = thread::spawn(move || {
            let request = server.recv().expect("request expected");
            assert_eq!(request.url(), "/api/items?refrigerator_id=fridge-1");
            let body = r#"[
                {"id":"a1","name":"Milk","expiry_date":"2024-06-10",
                 "status":"active","created_at":"2024-06-01T09:00:00Z"},
                {"id":"a2","name":"Eggs","expiry_date":"2024-06-20",
                 "status":"active","created_at":"2024-06-02T09:00:00Z"},
                {"id":"a3","name":"Old Ham","expiry_date":"2024-06-01",
                 "status":"consumed","created_at":"2024-06-03T09:00:00Z"}
            ]"#;
            let response = Response::from_string(body).with_status_code(200).with_header(
                Header::from_bytes("Content-Type", "application/json")
                    .expect("valid content type header"),
            );
            request.respond(response).expect("response should succeed");
        });

        let client = Client::new(&addr, Duration::from_secs(1))?;
        let params = ViewParameters {
            filter: FilterOption::Expired,
            ..ViewParameters::default()
        };
        let outcome = fetch_view(&client, "fridge-1", &params, sample_today())?;
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].id, "a1");

        handle.join().expect("server thread should join");
        Ok(())
    }
}
