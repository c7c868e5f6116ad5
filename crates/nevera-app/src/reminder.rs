// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Expiration reminder digests. The scheduled job selects active items
//! expiring tomorrow and groups them per member; delivery itself belongs to
//! an external collaborator, this module only builds the digests.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::dates;
use crate::model::{InventoryRecord, ItemStatus};

pub const UNKNOWN_PRODUCT_LABEL: &str = "unknown product";
pub const UNKNOWN_REFRIGERATOR_LABEL: &str = "unknown refrigerator";
pub const MEMBER_FALLBACK_NAME: &str = "member";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefrigeratorMember {
    pub user_id: String,
    pub display_name: String,
}

/// One inventory record joined with the refrigerator it lives in and that
/// refrigerator's members, as the reminder query returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockContext {
    pub record: InventoryRecord,
    pub refrigerator_name: String,
    pub members: Vec<RefrigeratorMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderLine {
    pub product_name: String,
    pub refrigerator_name: String,
}

/// Everything one member should be told in a single reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderDigest {
    pub user_id: String,
    pub display_name: String,
    pub lines: Vec<ReminderLine>,
}

impl ReminderDigest {
    /// The mock-delivery text the job prints in place of a real send.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("To: {} ({})\n", self.display_name, self.user_id));
        out.push_str("Subject: items expiring tomorrow\n");
        for line in &self.lines {
            out.push_str(&format!(
                "  - {} (in {})\n",
                line.product_name, line.refrigerator_name
            ));
        }
        out
    }
}

/// Builds per-member digests of active items expiring tomorrow.
///
/// Member order follows first appearance across the input; line order within
/// a digest follows input order. Records with unparseable expiry never enter
/// a digest.
pub fn build_reminder_digests(stocks: &[StockContext], today: Date) -> Vec<ReminderDigest> {
    let Some(tomorrow) = today.next_day() else {
        return Vec::new();
    };

    let mut digests: Vec<ReminderDigest> = Vec::new();

    for stock in stocks {
        if stock.record.status != ItemStatus::Active {
            continue;
        }
        if dates::parse_civil_date(&stock.record.expiry_date) != Some(tomorrow) {
            continue;
        }

        let product_name = if stock.record.name.is_empty() {
            UNKNOWN_PRODUCT_LABEL.to_owned()
        } else {
            stock.record.name.clone()
        };
        let refrigerator_name = if stock.refrigerator_name.is_empty() {
            UNKNOWN_REFRIGERATOR_LABEL.to_owned()
        } else {
            stock.refrigerator_name.clone()
        };

        for member in &stock.members {
            let index = match digests
                .iter()
                .position(|digest| digest.user_id == member.user_id)
            {
                Some(index) => index,
                None => {
                    digests.push(ReminderDigest {
                        user_id: member.user_id.clone(),
                        display_name: if member.display_name.is_empty() {
                            MEMBER_FALLBACK_NAME.to_owned()
                        } else {
                            member.display_name.clone()
                        },
                        lines: Vec::new(),
                    });
                    digests.len() - 1
                }
            };
            digests[index].lines.push(ReminderLine {
                product_name: product_name.clone(),
                refrigerator_name: refrigerator_name.clone(),
            });
        }
    }

    digests
}
