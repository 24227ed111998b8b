use crate::engine::RosterOutcome;
use crate::grid::{RosterCell, RosterGrid};
use crate::model::{Role, SlotRef, Submission};
use anyhow::{bail, Context};
use chrono::{DateTime, NaiveDate, Utc};
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Bornes d'affichage de la semaine planifiée (libellé remis au rendu).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> anyhow::Result<Self> {
        if end < start {
            bail!("week end must not precede start");
        }
        Ok(Self { start, end })
    }

    pub fn label(&self) -> String {
        format!("{}..{}", self.start, self.end)
    }
}

/// Import de soumissions depuis CSV:
/// header `name,phone,role,timestamp,slots`, `slots` au format
/// `day:period;day:period`, `role` vide vaut `intern`.
pub fn import_submissions_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Submission>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let phone = rec.get(1).context("missing phone")?.trim();
        if name.is_empty() || phone.is_empty() {
            bail!("invalid submission row (empty name or phone)");
        }
        let role = match rec.get(2).map(str::trim) {
            None | Some("") => Role::default(),
            Some(raw) => raw
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid role for {name}"))?,
        };
        let timestamp: DateTime<Utc> = rec
            .get(3)
            .context("missing timestamp")?
            .trim()
            .parse()
            .context("timestamp RFC3339")?;
        let slots = rec.get(4).context("missing slots")?.trim();
        let availability = parse_slot_list(slots)
            .with_context(|| format!("invalid slots value for {name}"))?;
        out.push(Submission {
            name: name.to_string(),
            phone: phone.to_string(),
            role,
            availability,
            timestamp,
            origin_id: None,
        });
    }
    Ok(out)
}

/// Liste `day:period` séparés par `;` ou `,`.
pub fn parse_slot_list(raw: &str) -> anyhow::Result<Vec<SlotRef>> {
    raw.split([';', ','])
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            let (day, period) = chunk
                .trim()
                .split_once(':')
                .context("slot must be day:period")?;
            Ok(SlotRef::new(day.trim(), period.trim()))
        })
        .collect()
}

fn seat_label(cell: &RosterCell) -> String {
    if cell.is_empty() {
        return "-".to_string();
    }
    cell.occupants()
        .map(|(_, p)| format!("{} ({})", p.name, p.phone))
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Table compacte : périodes en lignes, jours en colonnes.
pub fn render_text(grid: &RosterGrid, range: &WeekRange) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Permanences {}", range.label());

    let mut header = vec!["period".to_string()];
    header.extend(grid.config().days.iter().cloned());
    let _ = writeln!(out, "{}", header.join(" | "));

    for (pi, period) in grid.config().periods.iter().enumerate() {
        let mut row = vec![period.clone()];
        for di in 0..grid.config().days.len() {
            row.push(seat_label(grid.cell(di, pi)));
        }
        let _ = writeln!(out, "{}", row.join(" | "));
    }

    out
}

/// Export CSV de la grille : header `period,<jours…>`, une ligne par période,
/// cases vides laissées vides.
pub fn export_grid_csv<P: AsRef<Path>>(path: P, grid: &RosterGrid) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    let mut header = vec!["period".to_string()];
    header.extend(grid.config().days.iter().cloned());
    w.write_record(&header)?;
    for (pi, period) in grid.config().periods.iter().enumerate() {
        let mut row = vec![period.clone()];
        for di in 0..grid.config().days.len() {
            let cell = grid.cell(di, pi);
            row.push(if cell.is_empty() {
                String::new()
            } else {
                seat_label(cell)
            });
        }
        w.write_record(&row)?;
    }
    w.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct OutcomeReport<'a> {
    range: &'a WeekRange,
    grid: &'a RosterGrid,
    unplaced: &'a [String],
    decode_failures: &'a [crate::engine::DecodeFailure],
    uncovered_cells: usize,
}

/// Export JSON du résultat complet (jolie mise en forme).
pub fn export_outcome_json<P: AsRef<Path>>(
    path: P,
    outcome: &RosterOutcome,
    range: &WeekRange,
) -> anyhow::Result<()> {
    let report = OutcomeReport {
        range,
        grid: &outcome.grid,
        unplaced: &outcome.unplaced,
        decode_failures: &outcome.decode_failures,
        uncovered_cells: outcome.uncovered_cells(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(path, json)?;
    Ok(())
}
