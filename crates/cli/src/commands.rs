//! CLI commands

use anyhow::{Context, Result, bail};
use clap::{Args, Subcommand};
use saleorder_core::{AdminGuard, CurrentUser, GuardOutcome, Theme, WorkflowKind};
use saleorder_http::Session;
use saleorder_http::types::{
    ChartKind, ExportFilter, IssueOrderId, OrderFilter, OrderRecord, Pagination, ReportDetails,
};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::AppContext;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session token
    Login {
        username: String,

        /// Password (prefer the environment variable over the flag)
        #[arg(long, env = "SALEORDER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// End the session and discard pending uploads
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check that the service is up
    Health,

    /// Light/dark preference
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },

    /// Dashboard statistics
    Dashboard {
        #[command(subcommand)]
        command: DashboardCommands,
    },

    /// Order history
    Orders {
        #[command(subcommand)]
        command: OrderCommands,
    },

    /// Order-ID issuance
    OrderIds {
        #[command(subcommand)]
        command: OrderIdCommands,
    },

    /// Upload an order spreadsheet (.xls or .xlsx)
    Upload {
        file: PathBuf,

        /// Upload for the additional-order workflow
        #[arg(long)]
        additional: bool,
    },

    /// Generate and download sale-order reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Administrative views (admin users only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    Show,
    Set { theme: Theme },
    Toggle,
}

#[derive(Subcommand)]
pub enum DashboardCommands {
    /// Overview counters and top dealers/cities
    Stats,
    /// Series for one chart
    Chart {
        #[arg(long = "type", default_value = "monthly")]
        kind: ChartKind,
    },
}

#[derive(Subcommand)]
pub enum OrderCommands {
    List {
        #[command(flatten)]
        filter: OrderFilterArgs,
    },
    Show {
        id: i64,
    },
    /// Search dealers, cities, order IDs and users
    Search {
        query: String,
    },
    /// Dump orders as JSON
    Export {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        /// Only orders created by the signed-in user
        #[arg(long)]
        mine: bool,
    },
}

#[derive(Subcommand)]
pub enum OrderIdCommands {
    /// Latest issued ID and the suggested next one
    Status,
    /// Record an order ID as given to someone
    Issue {
        order_id: String,
        given_to: String,
        #[arg(long)]
        dealer: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        per_page: u32,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Generate the report for the pending upload
    Generate {
        #[arg(long)]
        dealer: String,
        #[arg(long)]
        city: String,
        /// Order date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        freight: Option<String>,
        /// Reuse an existing order ID
        #[arg(long)]
        order_id: Option<String>,
        /// Use the additional-order upload
        #[arg(long)]
        additional: bool,
    },
    /// Save a generated report to disk
    Download {
        name: String,
        /// Output file (defaults to the report name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AdminCommands {
    Overview,
    Users,
    /// Orders of every user
    Orders {
        #[command(flatten)]
        filter: OrderFilterArgs,
    },
    Sessions,
    /// Revoke one user's session
    Revoke {
        username: String,
    },
    /// Revoke every session, including your own
    RevokeAll,
    /// Tail of the server log
    Logs {
        #[arg(long)]
        lines: Option<u32>,
    },
}

#[derive(Args, Debug, Default)]
pub struct OrderFilterArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    per_page: Option<u32>,
    #[arg(long)]
    dealer: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    order_id: Option<String>,
    #[arg(long)]
    user: Option<String>,
    #[arg(long)]
    from: Option<String>,
    #[arg(long)]
    to: Option<String>,
    /// Only orders created by the signed-in user
    #[arg(long)]
    mine: bool,
}

impl From<OrderFilterArgs> for OrderFilter {
    fn from(args: OrderFilterArgs) -> Self {
        Self {
            page: args.page,
            per_page: args.per_page,
            dealer_name: args.dealer,
            city: args.city,
            order_id: args.order_id,
            username: args.user,
            date_from: args.from,
            date_to: args.to,
            only_mine: args.mine,
        }
    }
}

const fn workflow(additional: bool) -> WorkflowKind {
    if additional {
        WorkflowKind::AdditionalOrder
    } else {
        WorkflowKind::NewOrder
    }
}

/// Resolve the guard for this run; admin commands also need the admin flag
async fn authorize(session: &Session, admin: bool) -> Result<CurrentUser> {
    let guard = session.resolve_guard().await;
    let outcome = if admin {
        AdminGuard::new(&guard).outcome()
    } else {
        guard.outcome()
    };

    match outcome {
        GuardOutcome::Render(user) => {
            debug!(username = %user.username, admin, "Guard passed");
            Ok(user.clone())
        }
        GuardOutcome::Forbidden => bail!("Admin access required"),
        GuardOutcome::Redirect(_) | GuardOutcome::Loading => {
            bail!("Not logged in. Run `saleorder login`")
        }
    }
}

impl Commands {
    const fn needs_admin(&self) -> bool {
        matches!(self, Self::Admin { .. })
    }

    const fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Login { .. } | Self::Logout | Self::Theme { .. } | Self::Health
        )
    }

    pub async fn execute(self, context: &AppContext) -> Result<()> {
        let session = &context.session;
        let user = if self.is_public() {
            None
        } else {
            Some(authorize(session, self.needs_admin()).await?)
        };

        match self {
            Self::Login { username, password } => {
                let login = session
                    .login(&username, password.as_deref().unwrap_or_default())
                    .await?;
                let role = if login.is_admin { "admin" } else { "user" };
                println!("Logged in as {} ({role})", login.username);
                if let Some(expires_at) = login.expires_at {
                    println!("Session expires at {expires_at}");
                }
                Ok(())
            }
            Self::Logout => {
                session.logout().await?;
                println!("Logged out");
                Ok(())
            }
            Self::Whoami => {
                let user = user.context("Not logged in. Run `saleorder login`")?;
                let role = if user.is_admin { "admin" } else { "user" };
                println!("{} ({role})", user.username);
                Ok(())
            }
            Self::Health => {
                let health = session.health().await?;
                println!(
                    "{} (version {})",
                    health.status,
                    health.version.as_deref().unwrap_or("unknown")
                );
                Ok(())
            }
            Self::Theme { command } => command.execute(context),
            Self::Dashboard { command } => command.execute(session).await,
            Self::Orders { command } => command.execute(session).await,
            Self::OrderIds { command } => command.execute(session).await,
            Self::Upload { file, additional } => {
                let kind = workflow(additional);
                let draft = session.upload_spreadsheet(kind, &file).await?;
                println!(
                    "Uploaded {} as {} (upload {})",
                    draft.upload.filename, kind, draft.upload.upload_id
                );
                let flag = if additional { " --additional" } else { "" };
                println!("Next: saleorder report generate --dealer <name> --city <city>{flag}");
                Ok(())
            }
            Self::Report { command } => command.execute(session).await,
            Self::Admin { command } => command.execute(session).await,
        }
    }
}

impl ThemeCommands {
    pub fn execute(self, context: &AppContext) -> Result<()> {
        let theme = match self {
            Self::Show => context.theme.get(),
            Self::Set { theme } => {
                context.theme.set(theme)?;
                theme
            }
            Self::Toggle => context.theme.toggle()?,
        };
        println!("{theme}");
        Ok(())
    }
}

impl DashboardCommands {
    pub async fn execute(self, session: &Session) -> Result<()> {
        match self {
            Self::Stats => {
                let stats = session.dashboard_stats().await?;
                let o = &stats.overview;
                println!("Total orders:   {}", o.total_orders);
                println!("Your orders:    {}", o.user_orders);
                println!("Today:          {}", o.today_orders);
                println!("This month:     {}", o.month_orders);
                println!("Issued IDs:     {}", o.issued_ids);

                if !stats.top_dealers.is_empty() {
                    println!("\nTop dealers");
                    for dealer in &stats.top_dealers {
                        println!(
                            "  {:<32} {:>6}",
                            dealer.dealer_name.as_deref().unwrap_or("-"),
                            dealer.order_count
                        );
                    }
                }
                if !stats.top_cities.is_empty() {
                    println!("\nTop cities");
                    for city in &stats.top_cities {
                        println!("  {:<32} {:>6}", city.city.as_deref().unwrap_or("-"), city.order_count);
                    }
                }
                if !stats.recent_orders.is_empty() {
                    println!("\nRecent orders");
                    print_orders(&stats.recent_orders);
                }
                Ok(())
            }
            Self::Chart { kind } => {
                let chart = session.chart_data(kind).await?;
                for (label, value) in chart.labels.iter().zip(&chart.values) {
                    println!("{:<24} {value:>6}", label.as_deref().unwrap_or("-"));
                }
                Ok(())
            }
        }
    }
}

impl OrderCommands {
    pub async fn execute(self, session: &Session) -> Result<()> {
        match self {
            Self::List { filter } => {
                let page = session.orders(&filter.into()).await?;
                print_orders(&page.orders);
                print_pagination(&page.pagination);
                Ok(())
            }
            Self::Show { id } => {
                let order = session.order(id).await?;
                println!("{}", serde_json::to_string_pretty(&order)?);
                Ok(())
            }
            Self::Search { query } => {
                let results = session.search_orders(&query).await?;
                print_orders(&results.results);
                println!("{} result(s) for '{}'", results.count, results.query);
                Ok(())
            }
            Self::Export { from, to, mine } => {
                let filter = ExportFilter {
                    date_from: from,
                    date_to: to,
                    only_mine: mine,
                };
                let export = session.export_orders(&filter).await?;
                info!(count = export.count, "Orders exported");
                println!("{}", serde_json::to_string_pretty(&export)?);
                Ok(())
            }
        }
    }
}

impl OrderIdCommands {
    pub async fn execute(self, session: &Session) -> Result<()> {
        match self {
            Self::Status => {
                let status = session.order_id_status().await?;
                println!(
                    "Latest:    {}",
                    status.latest_id.as_deref().unwrap_or("none")
                );
                println!("Suggested: {}", status.suggested_id);
                Ok(())
            }
            Self::Issue {
                order_id,
                given_to,
                dealer,
                city,
            } => {
                let request = IssueOrderId {
                    order_id,
                    given_to_name: given_to,
                    dealer_name: dealer,
                    city,
                };
                let issued = session.issue_order_id(&request).await?;
                println!("Issued {} to {}", issued.order_id, issued.given_to_name);
                Ok(())
            }
            Self::List { page, per_page } => {
                let ids = session.issued_ids(page, per_page).await?;
                for record in &ids.issued_ids {
                    println!(
                        "{:<14} {:<20} {:<24} {}",
                        record.order_id.as_deref().unwrap_or("-"),
                        record.given_to_name.as_deref().unwrap_or("-"),
                        record.dealer_name.as_deref().unwrap_or("-"),
                        record.given_at.as_deref().unwrap_or("-"),
                    );
                }
                print_pagination(&ids.pagination);
                Ok(())
            }
        }
    }
}

impl ReportCommands {
    pub async fn execute(self, session: &Session) -> Result<()> {
        match self {
            Self::Generate {
                dealer,
                city,
                date,
                freight,
                order_id,
                additional,
            } => {
                let details = ReportDetails {
                    dealer_name: dealer,
                    city,
                    order_date: date,
                    freight_condition: freight,
                    custom_order_id: order_id,
                };
                let report = session
                    .generate_report(workflow(additional), &details)
                    .await?;
                println!("Order ID: {}", report.order_id);
                println!("Report:   {}", report.report_name);
                Ok(())
            }
            Self::Download { name, output } => {
                let bytes = session.download_report(&name).await?;
                let output = output.unwrap_or_else(|| PathBuf::from(&name));
                std::fs::write(&output, &bytes)
                    .with_context(|| format!("Failed to write {}", output.display()))?;
                println!("Saved {} ({} bytes)", output.display(), bytes.len());
                Ok(())
            }
        }
    }
}

impl AdminCommands {
    pub async fn execute(self, session: &Session) -> Result<()> {
        match self {
            Self::Overview => {
                let overview = session.admin_overview().await?;
                let s = &overview.stats;
                println!("Total orders:    {}", s.total_orders);
                println!("Today:           {}", s.today_orders);
                println!("Issued IDs:      {}", s.issued_ids);
                println!("Active sessions: {}", s.active_sessions);
                if !overview.recent_orders.is_empty() {
                    println!("\nRecent orders");
                    print_orders(&overview.recent_orders);
                }
                Ok(())
            }
            Self::Users => {
                for user in session.admin_users().await? {
                    println!("{:<24} {}", user.username, user.role);
                }
                Ok(())
            }
            Self::Orders { filter } => {
                let page = session.admin_orders(&filter.into()).await?;
                print_orders(&page.orders);
                print_pagination(&page.pagination);
                Ok(())
            }
            Self::Sessions => {
                for record in session.admin_sessions().await? {
                    println!(
                        "{:<20} {:<22} {}",
                        record.username,
                        record.issued_at.as_deref().unwrap_or("-"),
                        record.ip.as_deref().unwrap_or("-"),
                    );
                }
                Ok(())
            }
            Self::Revoke { username } => {
                let revoked = session.revoke_session(&username).await?;
                println!("Revoked session of {}", revoked.username);
                Ok(())
            }
            Self::RevokeAll => {
                session.revoke_all_sessions().await?;
                println!("All sessions revoked");
                Ok(())
            }
            Self::Logs { lines } => {
                let tail = session.admin_logs(lines).await?;
                for line in &tail.lines {
                    println!("{line}");
                }
                Ok(())
            }
        }
    }
}

fn print_orders(orders: &[OrderRecord]) {
    if orders.is_empty() {
        println!("No orders");
        return;
    }
    for order in orders {
        println!(
            "{:<14} {:<28} {:<16} {:<12} {}",
            order.order_id.as_deref().unwrap_or("-"),
            order.dealer_name.as_deref().unwrap_or("-"),
            order.city.as_deref().unwrap_or("-"),
            order.username.as_deref().unwrap_or("-"),
            order.generated_at.as_deref().unwrap_or("-"),
        );
    }
}

fn print_pagination(pagination: &Pagination) {
    println!(
        "Page {}/{} ({} total)",
        pagination.page, pagination.total_pages, pagination.total
    );
}
