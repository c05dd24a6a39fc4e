use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use monkey_classif::scatter::ScatterPlot;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};
use std::io;

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightCyan,
    Color::LightMagenta,
];

pub fn run_scatter(plot: &ScatterPlot) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, plot);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    plot: &ScatterPlot,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, plot))?;

        if let Event::Key(key) = event::read()? {
            if let KeyCode::Char('q') | KeyCode::Esc = key.code {
                return Ok(());
            }
        }
    }
}

/// Widen a degenerate range so the axis has something to span
fn padded([lo, hi]: [f64; 2]) -> [f64; 2] {
    if hi > lo {
        let margin = (hi - lo) * 0.05;
        [lo - margin, hi + margin]
    } else {
        [lo - 1.0, hi + 1.0]
    }
}

fn axis_labels([lo, hi]: [f64; 2]) -> Vec<Span<'static>> {
    let mid = (lo + hi) / 2.0;
    [lo, mid, hi]
        .iter()
        .map(|v| Span::raw(format!("{:.2}", v)))
        .collect()
}

fn ui(f: &mut Frame, plot: &ScatterPlot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.size());

    let datasets: Vec<Dataset> = plot
        .groups
        .iter()
        .enumerate()
        .map(|(i, group)| {
            Dataset::default()
                .name(group.species.clone())
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(PALETTE[i % PALETTE.len()]))
                .data(&group.points)
        })
        .collect();

    let x_bounds = padded(plot.x_bounds());
    let y_bounds = padded(plot.y_bounds());

    let title = format!(
        " {} vs {} ({} monkeys) ",
        plot.y,
        plot.x,
        plot.point_count()
    );

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title(plot.x.name())
                .style(Style::default().fg(Color::Gray))
                .bounds(x_bounds)
                .labels(axis_labels(x_bounds)),
        )
        .y_axis(
            Axis::default()
                .title(plot.y.name())
                .style(Style::default().fg(Color::Gray))
                .bounds(y_bounds)
                .labels(axis_labels(y_bounds)),
        );
    f.render_widget(chart, chunks[0]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("q/Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": quit"),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}
