use crate::cli::commands::open_shell;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::registry;
use crate::core::view::BoundView;
use crate::errors::AppResult;
use crate::models::field::FieldKind;
use crate::ui::messages::{header, hint, info};
use crate::utils::colors::{RESET, color_for_score, colorize_check, colorize_optional};
use crate::utils::table::{Column, Table};

fn render_cell(kind: FieldKind, raw: &str) -> String {
    match kind {
        FieldKind::Slider { .. } => match raw.parse::<i64>() {
            Ok(n) => format!("{}{}{}", color_for_score(n), raw, RESET),
            Err(_) => raw.to_string(),
        },
        FieldKind::Check => colorize_check(raw),
        FieldKind::Duration => colorize_optional(raw),
        _ => raw.to_string(),
    }
}

/// Render one bound view as a table, newest rows first.
pub fn render_view(view: &BoundView, limit: Option<usize>, text_width: usize, sep: &str) {
    let d = view.descriptor();
    header(format!("{} ({})", d.label, d.table), sep);

    if view.row_count() == 0 {
        hint("no rows");
        return;
    }

    let columns = view.headers().into_iter().map(|h| Column::new(h, 2)).collect();
    let mut table = Table::new(columns);

    let shown = limit.unwrap_or(usize::MAX);
    for row in view.rows().iter().take(shown) {
        let mut cells = vec![row.id.to_string()];
        for (i, f) in d.fields.iter().enumerate() {
            cells.push(render_cell(f.kind, row.cell(i)));
        }
        table.add_row(cells);
    }
    table.fit(text_width);
    print!("{}", table.render(sep));

    if view.row_count() > shown {
        hint(format!("... {} more row(s)", view.row_count() - shown));
    }
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::View { page, limit } = &cli.command {
        let mut shell = open_shell(cfg, cli.test)?;

        let name = page
            .clone()
            .unwrap_or_else(|| shell.last_page(&cfg.default_page));
        let handles = match shell.switch_page(&name) {
            Ok(h) => h,
            Err(e) => {
                shell.close()?;
                return Err(e);
            }
        };

        if let Some(p) = registry::page(&name) {
            info(p.title);
        }
        for h in handles {
            render_view(shell.views().view(h), *limit, cfg.text_width, &cfg.separator_char);
        }

        shell.close()?;
    }

    Ok(())
}
