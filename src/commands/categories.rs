// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, Direction};
use crate::utils::pretty_table;
use anyhow::Result;

pub fn handle() -> Result<()> {
    let mut data = Vec::new();
    for direction in [Direction::Income, Direction::Expense] {
        for c in Category::for_direction(direction) {
            data.push(vec![
                direction.label().to_string(),
                c.label().to_string(),
                c.alias().to_string(),
            ]);
        }
    }
    println!("{}", pretty_table(&["Type", "Category", "Alias"], data));
    Ok(())
}
