use crate::cli::commands::open_shell;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::registry::{self, PAGES, TRIGGERS};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::table::{Column, Table};
use std::collections::BTreeSet;

fn print_catalog(sep: &str) {
    header("Triggers (rwellog add <trigger>)", sep);
    let mut t = Table::new(vec![Column::new("trigger", 14), Column::new("commits", 10)]);
    for tr in TRIGGERS {
        t.add_row(vec![tr.name.to_string(), tr.records.join(", ")]);
    }
    t.fit(60);
    print!("{}", t.render(sep));

    header("Pages (rwellog view <page>)", sep);
    let mut p = Table::new(vec![Column::new("page", 8), Column::new("views", 10)]);
    for page in PAGES {
        p.add_row(vec![page.name.to_string(), page.records.join(", ")]);
    }
    p.fit(60);
    print!("{}", p.render(sep));
}

fn trigger_inputs(name: &str) -> AppResult<BTreeSet<&'static str>> {
    registry::trigger_inputs(registry::trigger(name)?)
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Form { trigger, list } = &cli.command {
        if *list {
            print_catalog(&cfg.separator_char);
            return Ok(());
        }

        let only = trigger.as_deref().map(trigger_inputs).transpose()?;
        let shell = open_shell(cfg, cli.test)?;

        header("Form inputs", &cfg.separator_char);
        let mut t = Table::new(vec![
            Column::new("input", 12),
            Column::new("kind", 8),
            Column::new("value", 8),
        ]);
        for (name, kind, value) in shell.form().inputs() {
            if only.as_ref().is_some_and(|set| !set.contains(name)) {
                continue;
            }
            t.add_row(vec![name.to_string(), kind.name().to_string(), value.to_string()]);
        }
        t.fit(cfg.text_width);
        print!("{}", t.render(&cfg.separator_char));
    }

    Ok(())
}
