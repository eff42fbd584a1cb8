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

mod inspect;
mod modify;

pub use {
    inspect::inspect_pack,
    modify::modify_packs
};

use dialoguer::{Confirm, theme::ColorfulTheme};

fn console_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn prompt_confirm<S: Into<String>>(prompt: S) -> dialoguer::Result<bool> {
    Confirm::with_theme(&console_theme())
        .with_prompt(prompt)
        .wait_for_newline(true)
        .default(false)
        .interact()
}
