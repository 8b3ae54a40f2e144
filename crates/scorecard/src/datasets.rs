// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

//! Rohit Sharma's Test career figures, as of October 2024.

use crate::error::Result;
use crate::registry::Headline;
use crate::table::RecordTable;
pub const PHASE: &str = "phase";
pub const POSITION: &str = "position";
pub const VENUE: &str = "venue";
pub const OPPOSITION: &str = "opposition";
pub const SITUATION: &str = "situation";
pub const DISMISSAL: &str = "dismissal";
pub const SHOT: &str = "shot";
pub fn all() -> Result<Vec<RecordTable>> {
    Ok(vec![
        phase()?,
        position()?,
        venue()?,
        opposition()?,
        situation()?,
        dismissal()?,
        shot()?,
    ])
}
pub fn phase() -> Result<RecordTable> {
    RecordTable::builder(PHASE)
        .column("Phase", vec!["2013-2016", "2017-2019", "2020-2022", "2023-2024"])
        .column("Matches", vec![18_i64, 14, 15, 11])
        .column("Innings", vec![32_i64, 25, 26, 19])
        .column("Runs", vec![1184_i64, 1276, 1045, 632])
        .column("Average", vec![39.47, 55.48, 41.80, 36.73])
        .column("Strike Rate", vec![49.87, 62.73, 54.42, 58.91])
        .column("50s", vec![3_i64, 5, 5, 3])
        .column("100s", vec![3_i64, 5, 2, 2])
        .build()
}
pub fn position() -> Result<RecordTable> {
    RecordTable::builder(POSITION)
        .column("Position", vec!["Opening", "#3", "#5", "#6"])
        .column("Innings", vec![58_i64, 2, 25, 17])
        .column("Runs", vec![2773_i64, 52, 996, 316])
        .column("Average", vec![49.52, 26.00, 43.30, 19.75])
        .column("Strike Rate", vec![58.37, 42.98, 53.65, 45.92])
        .column("50s", vec![10_i64, 0, 4, 2])
        .column("100s", vec![9_i64, 0, 2, 1])
        .build()
}
pub fn venue() -> Result<RecordTable> {
    RecordTable::builder(VENUE)
        .column("Venue", vec!["Home", "Away"])
        .column("Matches", vec![33_i64, 25])
        .column("Innings", vec![57_i64, 45])
        .column("Runs", vec![2692_i64, 1445])
        .column("Average", vec![50.79, 35.24])
        .column("Strike Rate", vec![58.91, 51.54])
        .column("50s", vec![9_i64, 7])
        .column("100s", vec![9_i64, 3])
        .build()
}
pub fn opposition() -> Result<RecordTable> {
    RecordTable::builder(OPPOSITION)
        .column(
            "Opposition",
            vec![
                "Australia",
                "Bangladesh",
                "England",
                "New Zealand",
                "South Africa",
                "Sri Lanka",
                "West Indies",
            ],
        )
        .column("Matches", vec![12_i64, 6, 15, 5, 9, 6, 5])
        .column("Innings", vec![23_i64, 9, 27, 9, 16, 10, 8])
        .column("Runs", vec![708_i64, 679, 927, 474, 714, 386, 249])
        .column("Average", vec![35.40, 97.00, 38.63, 59.25, 47.60, 38.60, 31.13])
        .column("High Score", vec![120_i64, 212, 161, 176, 212, 102, 177])
        .column("50s", vec![2_i64, 2, 3, 2, 2, 3, 2])
        .column("100s", vec![1_i64, 2, 3, 2, 2, 1, 1])
        .build()
}
pub fn situation() -> Result<RecordTable> {
    RecordTable::builder(SITUATION)
        .column(
            "Situation",
            vec!["1st innings", "2nd innings", "3rd innings", "4th innings"],
        )
        .column("Innings", vec![49_i64, 29, 17, 7])
        .column("Runs", vec![2487_i64, 834, 663, 153])
        .column("Average", vec![52.91, 29.79, 44.20, 25.50])
        .column("Strike Rate", vec![57.38, 54.16, 55.72, 51.00])
        .column("50s", vec![8_i64, 5, 3, 0])
        .column("100s", vec![9_i64, 1, 2, 0])
        .build()
}
pub fn dismissal() -> Result<RecordTable> {
    RecordTable::builder(DISMISSAL)
        .column(
            "Dismissal Type",
            vec!["Caught", "Bowled", "LBW", "Run Out", "Stumped"],
        )
        .column("Count", vec![63_i64, 14, 18, 3, 2])
        .column("Percentage", vec![63.0, 14.0, 18.0, 3.0, 2.0])
        .column("Average Runs", vec![43.86, 31.21, 39.17, 37.33, 22.50])
        .build()
}
pub fn shot() -> Result<RecordTable> {
    RecordTable::builder(SHOT)
        .column(
            "Shot Type",
            vec![
                "Defensive Stroke",
                "Front Foot Drive",
                "Flick/Glance",
                "Cut",
                "Pull/Hook",
                "Square Drive",
                "Sweep/Reverse Sweep",
                "Lofted Drive",
            ],
        )
        .column("Frequency (%)", vec![29.6, 19.8, 12.4, 11.9, 9.7, 7.6, 5.3, 3.7])
        .column("Runs Scored", vec![342_i64, 1142, 723, 692, 587, 423, 287, 258])
        .column("Average", vec![0.0, 47.58, 48.20, 49.43, 41.93, 42.30, 35.88, 32.25])
        .column("Dismissal Rate (%)", vec![1.8, 8.7, 6.4, 5.9, 7.2, 6.8, 9.1, 12.4])
        .build()
}
pub fn headlines() -> Vec<Headline> {
    vec![
        Headline::new("Test Matches", "58", "2013-Present"),
        Headline::new("Total Runs", "4,137", "Avg: 44.96"),
        Headline::new("Centuries", "12", "+16 Half-centuries"),
        Headline::new("Captaincy", "15 matches", "Win %: 66.67"),
    ]
}
