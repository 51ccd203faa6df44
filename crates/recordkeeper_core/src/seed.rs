//! Sample records loaded at start-up.
//!
//! Every list starts from the same fixed December 2025 data set so views
//! and counters are reproducible under a fixed clock.

use crate::model::communication::{
    CallEntry, CallKind, CallStatus, Conversation, FeedKind, FeedNotification, Message, Sender,
};
use crate::model::invoice::{Invoice, InvoiceTotals, PaymentState};
use crate::model::ledger::{LedgerCategory, LedgerEntry};
use crate::model::record::{Priority, RecordId};
use crate::model::report::{DateRange, Report, ReportKind, ReportLine, ReportState};
use crate::model::sale::{InventoryItem, OrderStage, Sale, TrackedOrder};
use crate::model::stock::StockItem;
use crate::model::task::{Task, TaskProgress};
use crate::model::ticket::{Ticket, TicketStatus};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .expect("valid seed timestamp")
}

/// Whole currency units.
fn units(value: i64) -> Decimal {
    Decimal::from(value)
}

/// Amount given in cents.
fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

fn id(value: &str) -> RecordId {
    RecordId::from(value)
}

pub fn ledger_entries() -> Vec<LedgerEntry> {
    let entry = |key: &str,
                 category: LedgerCategory,
                 title: &str,
                 description: &str,
                 amount: Option<i64>,
                 day: u32,
                 created: DateTime<Utc>| LedgerEntry {
        id: id(key),
        category,
        title: title.to_string(),
        description: description.to_string(),
        amount: amount.map(units),
        date: date(2025, 12, day),
        created_at: created,
    };
    vec![
        entry(
            "1",
            LedgerCategory::Sales,
            "Product Sale - Widget A",
            "Sold 10 units of Widget A to ABC Corp",
            Some(1500),
            8,
            at(2025, 12, 8, 10, 30),
        ),
        entry(
            "2",
            LedgerCategory::Expenses,
            "Office Supplies",
            "Purchased printer paper and ink cartridges",
            Some(150),
            7,
            at(2025, 12, 7, 14, 20),
        ),
        entry(
            "3",
            LedgerCategory::CustomerInfo,
            "New Customer - XYZ Ltd",
            "Contact: John Smith, Email: john@xyz.com, Phone: (555) 123-4567",
            None,
            6,
            at(2025, 12, 6, 9, 15),
        ),
        entry(
            "4",
            LedgerCategory::PersonalNotes,
            "Meeting Notes",
            "Discussed Q1 strategy and marketing plans",
            None,
            5,
            at(2025, 12, 5, 16, 45),
        ),
        entry(
            "5",
            LedgerCategory::Sales,
            "Service Contract",
            "Annual maintenance contract with DEF Company",
            Some(3000),
            4,
            at(2025, 12, 4, 11, 0),
        ),
    ]
}

pub fn sales() -> Vec<Sale> {
    let sale = |key: &str,
                item: &str,
                category: &str,
                quantity: u32,
                price_cents: i64,
                customer: &str,
                day: u32,
                description: &str| Sale {
        id: id(key),
        item_name: item.to_string(),
        category: category.to_string(),
        quantity,
        unit_price: cents(price_cents),
        customer_name: customer.to_string(),
        sale_date: date(2025, 12, day),
        description: description.to_string(),
        created_at: at(2025, 12, day, 9, 0),
    };
    vec![
        sale("1", "Laptop Pro", "electronics", 2, 129_999, "John Smith", 12, "Corporate bulk order"),
        sale("2", "Wireless Headphones", "electronics", 3, 19_999, "Sarah Johnson", 11, ""),
        sale("3", "Gaming Chair", "home", 1, 39_999, "Mike Davis", 10, "Home office setup"),
    ]
}

pub fn sales_inventory() -> Vec<InventoryItem> {
    [
        ("1", "Laptop Pro", "electronics", 25, 129_999),
        ("2", "Wireless Headphones", "electronics", 50, 19_999),
        ("3", "Smart Watch", "electronics", 8, 29_999),
        ("4", "Gaming Chair", "home", 15, 39_999),
        ("5", "Desk Lamp", "home", 30, 7_999),
        ("6", "Coffee Maker", "home", 5, 14_999),
        ("7", "Running Shoes", "sports", 20, 12_999),
        ("8", "Yoga Mat", "sports", 12, 4_999),
    ]
    .into_iter()
    .map(|(key, name, category, quantity, price)| InventoryItem {
        id: id(key),
        name: name.to_string(),
        category: category.to_string(),
        quantity,
        price: cents(price),
    })
    .collect()
}

pub fn tracked_orders() -> Vec<TrackedOrder> {
    [
        ("1", "John Smith", "PRD-001", 5, 2500, 12, OrderStage::Now),
        ("2", "Sarah Johnson", "PRD-002", 3, 1800, 11, OrderStage::Now),
        ("3", "Mike Davis", "PRD-003", 2, 1200, 10, OrderStage::Now),
        ("4", "Lisa Wilson", "PRD-001", 4, 2000, 8, OrderStage::Delivered),
        ("5", "Tom Brown", "PRD-004", 6, 3600, 7, OrderStage::Delivered),
        ("6", "Anna Taylor", "PRD-002", 2, 1200, 6, OrderStage::Cancelled),
    ]
    .into_iter()
    .map(|(key, client, product, order_units, amount, day, stage)| TrackedOrder {
        id: id(key),
        client_name: client.to_string(),
        product_id: product.to_string(),
        units: order_units,
        amount: units(amount),
        date: date(2025, 12, day),
        stage,
    })
    .collect()
}

pub fn stock_items() -> Vec<StockItem> {
    [
        ("1", "Laptop Pro", "LPT-001", "electronics", "TechCorp", 25, 10, 99_999, 129_999),
        ("2", "Wireless Mouse", "MSE-002", "electronics", "AccessoryPlus", 150, 50, 1_999, 3_999),
        ("3", "Office Chair", "CHR-003", "home", "FurnitureMax", 8, 15, 19_999, 39_999),
        ("4", "Running Shoes", "SHO-004", "sports", "SportGear", 0, 20, 7_999, 12_999),
        ("5", "Bluetooth Speaker", "SPK-005", "electronics", "AudioTech", 35, 25, 4_999, 8_999),
    ]
    .into_iter()
    .map(
        |(key, name, sku, category, supplier, quantity, min_stock, cost, price)| StockItem {
            id: id(key),
            name: name.to_string(),
            sku: sku.to_string(),
            category: category.to_string(),
            supplier: supplier.to_string(),
            quantity,
            min_stock,
            cost_price: cents(cost),
            selling_price: cents(price),
        },
    )
    .collect()
}

/// Seed invoices carry flat totals and no line items.
pub fn invoices() -> Vec<Invoice> {
    let invoice = |key: &str,
                   number: &str,
                   client: &str,
                   email: &str,
                   issued: NaiveDate,
                   due: NaiveDate,
                   description: &str,
                   amount: i64,
                   state: PaymentState| Invoice {
        id: id(key),
        number: number.to_string(),
        client_name: client.to_string(),
        client_email: email.to_string(),
        invoice_date: issued,
        due_date: due,
        description: description.to_string(),
        items: Vec::new(),
        totals: InvoiceTotals::flat(units(amount)),
        state,
        created_at: Utc.from_utc_datetime(&issued.and_hms_opt(9, 0, 0).expect("valid seed time")),
        paid_at: None,
    };
    vec![
        invoice(
            "1",
            "INV-1001",
            "ABC Corporation",
            "billing@abc-corp.com",
            date(2025, 12, 1),
            date(2025, 12, 31),
            "Web development services",
            2500,
            PaymentState::Paid,
        ),
        invoice(
            "2",
            "INV-1002",
            "XYZ Enterprises",
            "finance@xyz-ent.com",
            date(2025, 12, 5),
            date(2026, 1, 5),
            "Consulting services",
            1800,
            PaymentState::Pending,
        ),
        invoice(
            "3",
            "INV-1003",
            "Tech Solutions LLC",
            "accounts@techsol.com",
            date(2025, 11, 20),
            date(2025, 12, 10),
            "Software licensing",
            3200,
            PaymentState::Pending,
        ),
    ]
}

pub fn tasks() -> Vec<Task> {
    let task = |key: &str,
                title: &str,
                priority: Priority,
                assignee: &str,
                category: &str,
                start: NaiveDate,
                due: NaiveDate,
                description: &str,
                stored_status: &str| Task {
        id: id(key),
        title: title.to_string(),
        priority,
        assigned_to: assignee.to_string(),
        category: category.to_string(),
        start_date: start,
        due_date: due,
        description: description.to_string(),
        progress: TaskProgress::from_stored(stored_status),
        created_at: at(2025, 12, 1, 9, 0),
        completed_at: None,
    };
    vec![
        task(
            "1",
            "Update inventory system",
            Priority::High,
            "John Smith",
            "development",
            date(2025, 12, 10),
            date(2025, 12, 15),
            "Update the inventory management system with new features",
            "in-progress",
        ),
        task(
            "2",
            "Prepare monthly sales report",
            Priority::Medium,
            "Sarah Johnson",
            "sales",
            date(2025, 12, 12),
            date(2025, 12, 20),
            "Compile and analyze monthly sales data for presentation",
            "pending",
        ),
        task(
            "3",
            "Customer follow-up calls",
            Priority::Urgent,
            "Mike Davis",
            "support",
            date(2025, 12, 8),
            date(2025, 12, 10),
            "Follow up with customers who had support tickets",
            "overdue",
        ),
    ]
}

pub fn reports() -> Vec<Report> {
    [
        (
            "1",
            "Monthly Sales Report",
            ReportKind::Sales,
            DateRange::new(date(2025, 11, 1), date(2025, 11, 30)),
            at(2025, 12, 1, 9, 0),
        ),
        (
            "2",
            "Q4 Financial Report",
            ReportKind::Financial,
            DateRange::new(date(2025, 10, 1), date(2025, 12, 31)),
            at(2025, 12, 10, 14, 30),
        ),
        (
            "3",
            "Year-End Inventory Report",
            ReportKind::Inventory,
            DateRange::new(date(2025, 1, 1), date(2025, 12, 31)),
            at(2025, 12, 11, 11, 15),
        ),
    ]
    .into_iter()
    .map(|(key, name, kind, range, generated_on)| Report {
        id: id(key),
        name: name.to_string(),
        kind,
        range,
        generated_on,
        state: ReportState::Completed,
    })
    .collect()
}

/// Transaction lines written into every downloaded report.
pub fn report_lines() -> Vec<ReportLine> {
    [
        (1, "Product Sale - Widget A", 1500, "Sales"),
        (2, "Office Supplies", -250, "Expenses"),
        (3, "Service Revenue", 2200, "Sales"),
        (4, "Marketing Campaign", -800, "Marketing"),
        (5, "Product Sale - Widget B", 1800, "Sales"),
    ]
    .into_iter()
    .map(|(day, description, amount, category)| ReportLine {
        date: date(2025, 12, day),
        description: description.to_string(),
        amount: units(amount),
        category: category.to_string(),
    })
    .collect()
}

pub fn tickets() -> Vec<Ticket> {
    [
        (
            "TK-1001",
            "Unable to generate sales report",
            "Reports",
            Priority::High,
            TicketStatus::Open,
            at(2025, 12, 10, 9, 0),
            at(2025, 12, 12, 10, 30),
            "Getting error when trying to generate monthly sales report",
        ),
        (
            "TK-1002",
            "Inventory count discrepancy",
            "Inventory",
            Priority::Medium,
            TicketStatus::InProgress,
            at(2025, 12, 8, 14, 15),
            at(2025, 12, 11, 16, 45),
            "Physical count does not match system inventory",
        ),
        (
            "TK-1003",
            "Login issues on mobile device",
            "Technical",
            Priority::Low,
            TicketStatus::Resolved,
            at(2025, 12, 5, 11, 30),
            at(2025, 12, 6, 9, 15),
            "Cannot login using mobile browser",
        ),
    ]
    .into_iter()
    .map(
        |(key, subject, category, priority, status, created_at, last_updated, description)| {
            Ticket {
                id: id(key),
                subject: subject.to_string(),
                category: category.to_string(),
                priority,
                status,
                created_at,
                last_updated,
                description: description.to_string(),
            }
        },
    )
    .collect()
}

pub fn conversations() -> Vec<Conversation> {
    let message = |key: &str, text: &str, hour: u32, minute: u32, sender: Sender| Message {
        id: id(key),
        text: text.to_string(),
        at: at(2025, 12, 12, hour, minute),
        sender,
    };
    vec![
        Conversation {
            id: id("1"),
            name: "John Smith".to_string(),
            messages: vec![
                message("1-1", "Hello, I need help with my order", 10, 15, Sender::Contact),
                message("1-2", "Sure, I can help you with that", 10, 16, Sender::Me),
                message("1-3", "Thanks for the quick response!", 10, 30, Sender::Contact),
            ],
            unread: true,
        },
        Conversation {
            id: id("2"),
            name: "Sarah Johnson".to_string(),
            messages: vec![
                message("2-1", "Can you send me the invoice?", 9, 30, Sender::Contact),
                message("2-2", "Sure, sending it now", 9, 35, Sender::Me),
                message("2-3", "The invoice looks good", 9, 45, Sender::Contact),
            ],
            unread: false,
        },
    ]
}

pub fn calls() -> Vec<CallEntry> {
    [
        ("1", "John Smith", "+1 (555) 123-4567", CallKind::Incoming, "5:32", 10, 15),
        ("2", "Sarah Johnson", "+1 (555) 234-5678", CallKind::Outgoing, "12:45", 9, 30),
        ("3", "Mike Davis", "+1 (555) 345-6789", CallKind::Missed, "0:00", 8, 45),
    ]
    .into_iter()
    .map(|(key, contact, phone, kind, duration, hour, minute)| CallEntry {
        id: id(key),
        contact: contact.to_string(),
        phone: phone.to_string(),
        kind,
        duration: duration.to_string(),
        at: at(2025, 12, 12, hour, minute),
        status: match kind {
            CallKind::Missed => CallStatus::Missed,
            CallKind::Incoming | CallKind::Outgoing => CallStatus::Completed,
        },
    })
    .collect()
}

pub fn feed_notifications() -> Vec<FeedNotification> {
    [
        (
            "1",
            FeedKind::System,
            "System Backup Complete",
            "Daily backup completed successfully at 2:00 AM",
            2,
            false,
        ),
        (
            "2",
            FeedKind::Sales,
            "New Sale Recorded",
            "Sale of $2,500 recorded for ABC Corporation",
            10,
            false,
        ),
        (
            "3",
            FeedKind::Tasks,
            "Task Due Soon",
            "Update inventory system task is due in 2 days",
            8,
            true,
        ),
    ]
    .into_iter()
    .map(|(key, kind, title, message, hour, read)| FeedNotification {
        id: id(key),
        kind,
        title: title.to_string(),
        message: message.to_string(),
        at: at(2025, 12, 12, hour, if hour == 10 { 30 } else { 0 }),
        read,
    })
    .collect()
}
