/*
 * Respack - Minecraft resource pack tools
 * Copyright (C) 2025 Josh Kropf <josh@slashdev.ca>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

mod cli;
mod cmds;
mod logger;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::{io, path::{Path, PathBuf}};

use cmds::{inspect_pack, modify_packs};
use cli::{Parser, Cli, Commands};
use respack::Progress;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init(cli.verbose, cli.quiet)?;

    match cli.command {
        Commands::Modify { path, pack_format, recurse, no_backup, yes } => {
            let path = absolute_path(&expand_path(&path)?)?;

            modify_packs(&path, pack_format, recurse, !no_backup, yes)
        },
        Commands::Inspect { path } => {
            let path = absolute_path(&expand_path(&path)?)?;

            inspect_pack(&path)
        }
    }
}

fn expand_path(path: &Path) -> anyhow::Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)?;
    Ok(PathBuf::from(expanded.into_owned()))
}

fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    Ok(if !path.is_absolute() {
        std::env::current_dir()?.join(path)
    } else {
        path.to_owned()
    })
}

struct ProgressHandler {
    progress: ProgressBar
}

impl ProgressHandler {
    fn new() -> Self {
        ProgressHandler {
            progress: ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr())
                .with_style(ProgressStyle::with_template("{bar:40.cyan/blue} {msg} {pos}/{len}").unwrap())
        }
    }
}

impl Progress for ProgressHandler {
    fn advance(&mut self, current: usize) {
        self.progress.set_position(current as u64);
    }

    fn begin(&mut self, message: &'static str, total: usize) {
        self.progress.set_length(total as u64);
        self.progress.set_message(message);
        self.progress.reset();
    }

    fn end(&mut self) {
        self.progress.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_plain_path() {
        let path = Path::new("packs/Faithful 32x.zip");
        assert_eq!(expand_path(path).unwrap(), path.to_path_buf());
    }

    #[test]
    fn expand_env_var() {
        std::env::set_var("RESPACK_TEST_PACKS", "/srv/minecraft/resourcepacks");

        assert_eq!(
            expand_path(Path::new("$RESPACK_TEST_PACKS/Faithful.zip")).unwrap(),
            PathBuf::from("/srv/minecraft/resourcepacks/Faithful.zip")
        );
    }

    #[test]
    fn expand_unknown_var_fails() {
        assert!(expand_path(Path::new("$RESPACK_TEST_NOT_SET_ANYWHERE/pack.zip")).is_err());
    }
}
