//! Terminal and JSON rendering of scan results.

use std::fmt::Display;
use std::io::{self, Write};
use std::path::Path;

use owo_colors::{OwoColorize, Style};
use rust_decimal::Decimal;
use serde_json::json;

use crate::arbitrage::{MatchReport, ScanSummary};
use crate::odds::Region;
use crate::utils::format_money;

const BANNER_PAD: usize = 2;

/// Arguments echoed in verbose mode.
#[derive(Debug, Clone, Copy)]
pub struct RunArguments<'a> {
    /// Demo mode enabled.
    pub demo: bool,
    /// Fixture path.
    pub demo_file: &'a Path,
    /// Total stake.
    pub bet: Decimal,
    /// Sport filter.
    pub sport: &'a str,
    /// Region filter.
    pub region: Region,
}

/// Writes scan output either as colored text or JSON lines.
pub struct Reporter<W: Write> {
    out: W,
    color: bool,
    json: bool,
    verbose: bool,
}

impl<W: Write> Reporter<W> {
    /// Create a reporter.
    pub fn new(out: W, color: bool, json: bool, verbose: bool) -> Self {
        Self {
            out,
            color,
            json,
            verbose,
        }
    }

    /// Consume the reporter and return the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: impl Display, style: Style) -> String {
        if self.color {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn success(&self, text: impl Display) -> String {
        self.paint(text, Style::new().bold().green())
    }

    fn failure(&self, text: impl Display) -> String {
        self.paint(text, Style::new().bold().red())
    }

    fn caution(&self, text: impl Display) -> String {
        self.paint(text, Style::new().yellow())
    }

    /// Banner, disclaimer and start line.
    pub fn header(&mut self, version: &str) -> io::Result<()> {
        if self.json {
            return Ok(());
        }

        let title = format!("BetArbit v{version}");
        let width = title.chars().count() + BANNER_PAD * 2;
        let pad = " ".repeat(BANNER_PAD);
        let style = Style::new().bold().cyan();

        let lines = [
            format!("╔{}╗", "═".repeat(width)),
            format!("║{}║", " ".repeat(width)),
            format!("║{pad}{title}{pad}║"),
            format!("║{}║", " ".repeat(width)),
            format!("╚{}╝", "═".repeat(width)),
        ];

        writeln!(self.out)?;
        for line in lines {
            let painted = self.paint(line, style);
            writeln!(self.out, " {painted}")?;
        }
        writeln!(self.out)?;

        let disclaimer = self.caution(
            "Arbitrage gambling has a variety of factors that can negatively affect profit. \
             Do not use this cli to place real-world bets.",
        );
        writeln!(self.out, "{disclaimer}")?;
        writeln!(self.out, "Starting...")
    }

    /// Echo the effective arguments (verbose mode only).
    pub fn arguments(&mut self, args: &RunArguments<'_>) -> io::Result<()> {
        if self.json || !self.verbose {
            return Ok(());
        }

        let green = Style::new().green();
        let lines = [
            self.paint("Arguments", green),
            format!("  demo: {}", self.paint(args.demo, green)),
            format!("  demoFile: {}", self.paint(args.demo_file.display(), green)),
            format!("  bet: {}", self.paint(args.bet, green)),
            format!("  sport: {}", self.paint(args.sport, green)),
            format!("  region: {}", self.paint(args.region, green)),
        ];
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        Ok(())
    }

    /// Render one match.
    pub fn match_report(&mut self, report: &MatchReport) -> io::Result<()> {
        if self.json {
            let line = serde_json::to_string(report).map_err(io::Error::other)?;
            return writeln!(self.out, "{line}");
        }

        let event = &report.event;
        let evaluation = &report.evaluation;

        writeln!(
            self.out,
            "Checking for arbitrage on {}, {}",
            event.sport_key,
            event.teams_label()
        )?;

        if self.verbose {
            if let Some(kickoff) = event.kickoff_str() {
                writeln!(self.out, "  Kickoff: {kickoff}")?;
            }
            for warning in &report.quote_warnings {
                let line = self.caution(format!("Note: {warning}"));
                writeln!(self.out, "  {line}")?;
            }
        }

        if !evaluation.is_profitable {
            let line = self.failure("No profitable arbitrage found.");
            return writeln!(self.out, "{line}\n");
        }

        let line = self.success(format!(
            "Profitable arbitrage found at {:.2}% ({:.2}% edge), calculating ideal wagers",
            evaluation.margin.round_dp(2),
            evaluation.edge_pct().round_dp(2)
        ));
        writeln!(self.out, "{line}")?;

        for warning in &evaluation.warnings {
            let line = self.failure(format!(
                "!! Incomplete odds in match {}, {}: {}",
                event.sport_key,
                event.teams_label(),
                warning
            ));
            writeln!(self.out, "{line}")?;
        }

        if evaluation.wagers.is_empty() {
            let line = self.failure("No valid wagers found for this match.");
            return writeln!(self.out, "{line}\n");
        }

        let line = self.success("Found ideal wagers");
        writeln!(self.out, "{line}")?;
        for wager in &evaluation.wagers {
            let line = self.success(format!(
                "Selection {}({}) on {} with ${}",
                wager.index,
                wager.odd,
                wager.site_key,
                format_money(wager.amount)
            ));
            writeln!(self.out, "{line}")?;
        }

        let line = self.success(format!(
            "Profit if win: ${}",
            format_money(evaluation.profit)
        ));
        writeln!(self.out, "{line}")?;
        if self.verbose {
            writeln!(
                self.out,
                "  Return on stake: {:.2}%",
                evaluation.roi().round_dp(2)
            )?;
        }

        if evaluation.partial {
            let range = evaluation
                .profit_range
                .map(|r| format!(" (${} to ${})", format_money(r.min), format_money(r.max)))
                .unwrap_or_default();
            let line = self.caution(format!(
                "Partial odds matrix: profit covers quoted outcomes only{range}"
            ));
            writeln!(self.out, "{line}")?;
        }

        writeln!(self.out)
    }

    /// Render the closing summary.
    pub fn summary(&mut self, summary: &ScanSummary) -> io::Result<()> {
        if self.json {
            let line = json!({
                "profitableMatches": summary.profitable_matches,
                "incompleteMatches": summary.incomplete_matches,
                "totalProfit": format_money(summary.total_profit),
            });
            return writeln!(self.out, "{line}");
        }

        if summary.profitable_matches == 0 {
            let line = self.failure("Could not find any arbitrage bets for the given data.");
            return writeln!(self.out, "{line}");
        }

        let count = self.success(summary.profitable_matches);
        let profit = self.success(format_money(summary.total_profit));
        writeln!(
            self.out,
            "Successfully found a total of {count} possible arbitrage bets with a total potential profit of {profit}"
        )
    }

    /// Render every match then the summary.
    pub fn scan(&mut self, summary: &ScanSummary) -> io::Result<()> {
        for report in &summary.reports {
            self.match_report(report)?;
        }
        self.summary(summary)
    }
}
