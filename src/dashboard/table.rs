//! Column layout and per-row cell views.

use super::highlight::cell_style;
use crate::bets::BetOpportunity;

/// Displayed columns. `scraper_id` is deliberately absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    MatchName,
    Roi,
    MatchDate,
    BetType,
    Bookmaker1,
    Bookmaker2,
    PlayerName,
    Odds1,
    Odds2,
}

impl Column {
    pub const ALL: [Column; 9] = [
        Column::MatchName,
        Column::Roi,
        Column::MatchDate,
        Column::BetType,
        Column::Bookmaker1,
        Column::Bookmaker2,
        Column::PlayerName,
        Column::Odds1,
        Column::Odds2,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Column::MatchName => "Match Name",
            Column::Roi => "ROI",
            Column::MatchDate => "Match Date",
            Column::BetType => "Bet Type",
            Column::Bookmaker1 => "Bookmaker 1",
            Column::Bookmaker2 => "Bookmaker 2",
            Column::PlayerName => "Player Name",
            Column::Odds1 => "Odds 1",
            Column::Odds2 => "Odds 2",
        }
    }

    /// Key of the field in the feed payload.
    pub fn accessor(self) -> &'static str {
        match self {
            Column::MatchName => "Matchname",
            Column::Roi => "ROI",
            Column::MatchDate => "Matchdate",
            Column::BetType => "Bettype",
            Column::Bookmaker1 => "Bookmaker1",
            Column::Bookmaker2 => "Bookmaker2",
            Column::PlayerName => "PlayerName",
            Column::Odds1 => "Odds1",
            Column::Odds2 => "Odds2",
        }
    }

    pub fn cell(self, bet: &BetOpportunity) -> &str {
        match self {
            Column::MatchName => &bet.match_name,
            Column::Roi => bet.roi.as_str(),
            Column::MatchDate => &bet.match_date,
            Column::BetType => &bet.bet_type,
            Column::Bookmaker1 => &bet.bookmaker_1,
            Column::Bookmaker2 => &bet.bookmaker_2,
            Column::PlayerName => &bet.player_name,
            Column::Odds1 => &bet.odds_1,
            Column::Odds2 => &bet.odds_2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub text: String,
    pub style: String,
}

/// One styled cell per column, in column order.
pub fn row_cells(bet: &BetOpportunity) -> Vec<CellView> {
    Column::ALL
        .iter()
        .map(|column| {
            let text = column.cell(bet);
            CellView {
                text: text.to_string(),
                style: cell_style(text),
            }
        })
        .collect()
}
