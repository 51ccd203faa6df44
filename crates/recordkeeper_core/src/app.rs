//! Application context owning every dashboard manager.
//!
//! # Responsibility
//! - Build all managers from config and seed data with one shared clock
//!   and notifier.
//! - Gate the dashboard behind the login session.
//! - Render navigation sections into fresh `SectionView`s.
//!
//! # Invariants
//! - There is exactly one manager per domain; nothing is looked up
//!   globally.
//! - Rendering a section never mutates a manager.

use crate::clock::Clock;
use crate::config::AppConfig;
use crate::format::{format_compact_currency, format_compact_number};
use crate::model::invoice::InvoiceStatus;
use crate::model::ledger::LedgerCategory;
use crate::model::record::ValidationError;
use crate::model::sale::SalesPeriods;
use crate::seed;
use crate::service::communication::CommunicationManager;
use crate::service::invoices::{InvoiceManager, InvoiceSchema};
use crate::service::ledger::LedgerManager;
use crate::service::reports::ReportManager;
use crate::service::sales::SalesManager;
use crate::service::schema::{Facet, FilterState};
use crate::service::stock::StockManager;
use crate::service::support::SupportManager;
use crate::service::tasks::TaskManager;
use crate::session::Session;
use crate::view::model::{MetricCard, SectionView, Tone};
use crate::view::navigation::{Navigator, Section};
use crate::view::notice::{DismissAfter, Notifier};
use log::info;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

pub struct AppContext {
    config: AppConfig,
    clock: Arc<dyn Clock>,
    session: Session,
    navigator: Navigator,
    ledger: LedgerManager,
    sales: SalesManager,
    stock: StockManager,
    invoices: InvoiceManager,
    tasks: TaskManager,
    reports: ReportManager,
    support: SupportManager,
    communication: CommunicationManager,
}

impl AppContext {
    /// Builds every manager over the seed data.
    pub fn new(config: AppConfig, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        let notifier: Arc<dyn Notifier> = Arc::new(DismissAfter::new(
            notifier,
            Duration::from_millis(config.notice_dismiss_ms),
        ));
        let ctx = Self {
            ledger: LedgerManager::new(seed::ledger_entries(), clock.clone(), notifier.clone()),
            sales: SalesManager::new(
                seed::sales(),
                seed::sales_inventory(),
                seed::tracked_orders(),
                config.inventory_low_threshold,
                clock.clone(),
                notifier.clone(),
            ),
            stock: StockManager::new(seed::stock_items(), clock.clone(), notifier.clone()),
            invoices: InvoiceManager::new(
                InvoiceSchema::new(
                    config.tax_rate,
                    config.invoice_due_days,
                    config.first_invoice_number,
                ),
                seed::invoices(),
                clock.clone(),
                notifier.clone(),
            ),
            tasks: TaskManager::new(
                config.task_due_days,
                seed::tasks(),
                clock.clone(),
                notifier.clone(),
            ),
            reports: ReportManager::new(
                seed::reports(),
                seed::report_lines(),
                Duration::from_millis(config.report_delay_ms),
                clock.clone(),
                notifier.clone(),
            ),
            support: SupportManager::new(
                config.first_ticket_number,
                seed::tickets(),
                clock.clone(),
                notifier.clone(),
            ),
            communication: CommunicationManager::new(
                seed::conversations(),
                seed::calls(),
                seed::feed_notifications(),
                clock.clone(),
                notifier,
            ),
            config,
            clock,
            session: Session::new(),
            navigator: Navigator::new(),
        };
        info!("event=app_context_init module=app status=ok");
        ctx
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ValidationError> {
        self.session.login(username, password)
    }

    /// Ends the session and returns navigation to the dashboard.
    pub fn logout(&mut self) {
        self.session.logout();
        self.navigator.reset();
    }

    pub fn current_section(&self) -> Section {
        self.navigator.current()
    }

    /// Selects a section by sidebar label; unknown labels open the dashboard.
    pub fn navigate(&mut self, label: &str) -> Section {
        self.navigator.select_label(label)
    }

    pub fn ledger(&self) -> &LedgerManager {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut LedgerManager {
        &mut self.ledger
    }

    pub fn sales(&self) -> &SalesManager {
        &self.sales
    }

    pub fn sales_mut(&mut self) -> &mut SalesManager {
        &mut self.sales
    }

    pub fn stock(&self) -> &StockManager {
        &self.stock
    }

    pub fn stock_mut(&mut self) -> &mut StockManager {
        &mut self.stock
    }

    pub fn invoices(&self) -> &InvoiceManager {
        &self.invoices
    }

    pub fn invoices_mut(&mut self) -> &mut InvoiceManager {
        &mut self.invoices
    }

    pub fn tasks(&self) -> &TaskManager {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskManager {
        &mut self.tasks
    }

    pub fn reports(&self) -> &ReportManager {
        &self.reports
    }

    pub fn reports_mut(&mut self) -> &mut ReportManager {
        &mut self.reports
    }

    pub fn support(&self) -> &SupportManager {
        &self.support
    }

    pub fn support_mut(&mut self) -> &mut SupportManager {
        &mut self.support
    }

    pub fn communication(&self) -> &CommunicationManager {
        &self.communication
    }

    pub fn communication_mut(&mut self) -> &mut CommunicationManager {
        &mut self.communication
    }

    pub fn render_current(&self, filter: FilterState) -> SectionView {
        self.render_section_filtered(self.navigator.current(), filter)
    }

    pub fn render_section(&self, section: Section) -> SectionView {
        self.render_section_filtered(section, FilterState::new())
    }

    /// Builds a section from live manager state: metric cards, optional
    /// tab strip and the filtered list.
    pub fn render_section_filtered(&self, section: Section, filter: FilterState) -> SectionView {
        let (cards, tabs, content) = match section {
            Section::Dashboard => (self.dashboard_cards(), None, self.ledger.view(filter)),
            Section::Accounts => {
                let filter = if filter.selections.contains_key(&Facet::Category) {
                    filter
                } else {
                    filter.with_selection(Facet::Category, LedgerCategory::CustomerInfo.as_str())
                };
                (self.account_cards(), None, self.ledger.view(filter))
            }
            Section::SalesTrack => (
                self.sales_cards(),
                Some(self.sales.tab_strip()),
                self.sales.orders_view(filter),
            ),
            Section::Stock => (self.stock_cards(), None, self.stock.view(filter)),
            Section::Invoices => (self.invoice_cards(), None, self.invoices.view(filter)),
            Section::TaskSchedule => (self.task_cards(), None, self.tasks.view(filter)),
            Section::Communication => (
                self.communication_cards(),
                Some(self.communication.tab_strip()),
                self.communication.view(filter),
            ),
            Section::Report => (self.report_cards(), None, self.reports.view(filter)),
            Section::Support => (self.support_cards(), None, self.support.view(filter)),
        };
        SectionView {
            section,
            title: section.title(),
            subtitle: section.subtitle(),
            cards,
            tabs,
            content,
        }
    }

    fn dashboard_cards(&self) -> Vec<MetricCard> {
        let stats = self.ledger.stats();
        let tone = if stats.net.is_sign_negative() {
            Tone::Danger
        } else {
            Tone::Positive
        };
        vec![
            MetricCard::new("Total Records", stats.total_records),
            MetricCard::new("Sales Records", stats.sales_count),
            MetricCard::new("Expense Records", stats.expenses_count),
            MetricCard::new("Net Revenue", format_compact_currency(stats.net)).toned(tone),
        ]
    }

    /// Accounts are distinct client names across invoices and sales; an
    /// account is pending while it has an unpaid invoice.
    fn account_cards(&self) -> Vec<MetricCard> {
        let today = self.clock.now().date_naive();
        let mut accounts = BTreeSet::new();
        let mut pending = BTreeSet::new();
        for invoice in self.invoices.invoices().records() {
            let name = invoice.client_name.trim().to_lowercase();
            if invoice.status(today) != InvoiceStatus::Paid {
                pending.insert(name.clone());
            }
            accounts.insert(name);
        }
        for sale in self.sales.sales().records() {
            accounts.insert(sale.customer_name.trim().to_lowercase());
        }
        vec![
            MetricCard::new("Total Accounts", accounts.len()),
            MetricCard::new("Active Accounts", accounts.len() - pending.len()),
            MetricCard::new("Pending", pending.len()).toned(Tone::Warning),
        ]
    }

    fn sales_cards(&self) -> Vec<MetricCard> {
        let periods = SalesPeriods::from_sales(
            self.sales.sales().records(),
            self.clock.now().date_naive(),
        );
        let growth = match periods.growth_percent() {
            Some(percent) if percent.is_sign_negative() => {
                MetricCard::new("Growth Rate", format!("{}%", format_compact_number(percent)))
                    .toned(Tone::Danger)
            }
            Some(percent) => {
                MetricCard::new("Growth Rate", format!("+{}%", format_compact_number(percent)))
                    .toned(Tone::Positive)
            }
            None => MetricCard::new("Growth Rate", "n/a"),
        };
        vec![
            MetricCard::new("Today's Sales", format_compact_currency(periods.today)),
            MetricCard::new("This Month", format_compact_currency(periods.this_month)),
            growth,
        ]
    }

    fn stock_cards(&self) -> Vec<MetricCard> {
        let overview = self.stock.overview();
        vec![
            MetricCard::new("Total Items", overview.total_units),
            MetricCard::new("Low Stock", overview.low_stock).toned(Tone::Warning),
            MetricCard::new("Out of Stock", overview.out_of_stock).toned(Tone::Danger),
        ]
    }

    fn invoice_cards(&self) -> Vec<MetricCard> {
        let summary = self.invoices.summary();
        vec![
            MetricCard::new("Total Invoices", summary.total),
            MetricCard::new("Paid", summary.paid).toned(Tone::Positive),
            MetricCard::new("Outstanding", summary.pending + summary.overdue)
                .toned(Tone::Warning),
        ]
    }

    fn task_cards(&self) -> Vec<MetricCard> {
        let summary = self.tasks.summary();
        vec![
            MetricCard::new("Today's Tasks", summary.due_today),
            MetricCard::new("This Week", summary.due_this_week),
            MetricCard::new("Overdue", summary.overdue).toned(Tone::Warning),
        ]
    }

    fn communication_cards(&self) -> Vec<MetricCard> {
        let summary = self.communication.summary();
        vec![
            MetricCard::new("Unread Messages", summary.unread_conversations),
            MetricCard::new("Recent Calls", summary.recent_calls),
            MetricCard::new("Notifications", summary.unread_notifications),
        ]
    }

    fn report_cards(&self) -> Vec<MetricCard> {
        let range = self
            .reports
            .selected_range()
            .map_or_else(|| "Not set".to_string(), |range| range.describe());
        vec![
            MetricCard::new("Total Reports", self.reports.reports().len()),
            MetricCard::new("Date Range", range),
        ]
    }

    fn support_cards(&self) -> Vec<MetricCard> {
        let summary = self.support.summary();
        vec![
            MetricCard::new("Open Tickets", summary.open).toned(Tone::Warning),
            MetricCard::new("In Progress", summary.in_progress),
            MetricCard::new("Resolved", summary.resolved).toned(Tone::Positive),
        ]
    }
}
