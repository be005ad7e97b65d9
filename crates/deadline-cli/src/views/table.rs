use chrono::NaiveDateTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use deadline_core::deploy_log::{DeploymentLog, VoteBoard};

pub fn build_log_table(log: &DeploymentLog, board: &VoteBoard, now: NaiveDateTime, color: bool) -> Table {
    let mut table = Table::new();
    if !color {
        table.force_no_tty();
    }
    table.set_header(vec!["#", "Date", "Product", "Description", "Link", "Votes"]);

    for (index, entry) in log.entries().iter().enumerate() {
        let mut row = Row::new();
        row.add_cell(Cell::new(index + 1));
        row.add_cell(Cell::new(&entry.date));
        row.add_cell(Cell::new(&entry.product).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(&entry.description));
        row.add_cell(Cell::new(&entry.link).fg(Color::Blue));

        let votes = board.votes(index).unwrap_or(0);
        let votes_cell = if board.is_pulsing(index, now) {
            // Freshly upvoted rows flash until the pulse runs out.
            Cell::new(format!("▲ {}", votes))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(votes)
        };
        row.add_cell(votes_cell);

        table.add_row(row);
    }

    table
}

pub fn display_log(log: &DeploymentLog, board: &VoteBoard, now: NaiveDateTime, color: bool) {
    if log.is_empty() {
        println!("No deployment log entries.");
        return;
    }

    println!("{}", build_log_table(log, board, now, color));
}
