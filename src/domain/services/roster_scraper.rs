// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::player::{Player, Position, DEFAULT_NATIONALITY};
use crate::utils::norwegian_date::parse_norwegian_date;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::debug;

static CONTAINER: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"div[class*="players"], section[class*="players"]"#).unwrap());
static HEADER: Lazy<Selector> = Lazy::new(|| Selector::parse("h2").unwrap());
static GRID_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li.grid__item").unwrap());
static PLAYER_NAME: Lazy<Selector> = Lazy::new(|| Selector::parse(".player__name").unwrap());
static PLAYER_IMAGE: Lazy<Selector> = Lazy::new(|| Selector::parse(".player__image").unwrap());
static IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img[src]").unwrap());
static IMAGE_DIV: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"div[class*="image"], div[class*="photo"]"#).unwrap()
});
static DETAILS: Lazy<Selector> = Lazy::new(|| Selector::parse("dl.player__details").unwrap());
static CSS_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"url\(\s*['"]?([^'")]+?)['"]?\s*\)"#).unwrap());

/// 从阵容页面解析出的球员
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedPlayer {
    pub first_name: String,
    pub last_name: String,
    pub position: Position,
    /// 页面未给出时为 Norway
    pub nationality: String,
    pub date_of_birth: Option<NaiveDate>,
    pub image_url: Option<String>,
}

impl ScrapedPlayer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// 生成新球员，ID 形如 `player_ola_hansen_20250401180000`
    pub fn into_player(self, team_id: &str, now: DateTime<Utc>) -> Player {
        let id = format!(
            "player_{}_{}",
            self.full_name().to_lowercase().replace(' ', "_"),
            now.format("%Y%m%d%H%M%S")
        );
        Player {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            position: self.position,
            nationality: Some(self.nationality),
            image_url: self.image_url,
            date_of_birth: self.date_of_birth,
            team_id: Some(team_id.to_string()),
            created_at: now,
            updated_at: now,
        }
    }
}

/// 根据分组标题推断位置
pub fn position_from_header(header: &str) -> Position {
    let header = header.to_lowercase();
    if header.contains("keeper") {
        Position::Goalkeeper
    } else if header.contains("forsvar") {
        Position::Defender
    } else if header.contains("midtbane") {
        Position::Midfielder
    } else if header.contains("angrep") || header.contains("spiss") {
        Position::Forward
    } else {
        Position::Undefined
    }
}

fn is_staff_header(header: &str) -> bool {
    let header = header.to_lowercase();
    header.is_empty() || header.contains("støtteapparat") || header.contains("staff")
}

/// 解析球队阵容页面
///
/// 在第一个 class 含 `players` 的容器内遍历每个 `h2` 分组标题，取标题父节点下的
/// `li.grid__item` 作为该分组的球员。教练组分组被跳过，同名球员只保留第一次出现。
pub fn parse_roster(html: &str) -> Vec<ScrapedPlayer> {
    let document = Html::parse_document(html);
    let Some(container) = document.select(&CONTAINER).next() else {
        debug!("No players container found");
        return Vec::new();
    };

    let mut players = Vec::new();
    let mut seen = HashSet::new();

    for header in container.select(&HEADER) {
        let title = text_of(header);
        if is_staff_header(&title) {
            debug!(header = %title, "Skipping non-player section");
            continue;
        }
        let position = position_from_header(&title);

        let Some(section) = header.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        for item in section.select(&GRID_ITEM) {
            if let Some(player) = parse_player(item, position) {
                if seen.insert(player.full_name()) {
                    players.push(player);
                }
            }
        }
    }

    players
}

fn parse_player(item: ElementRef, position: Position) -> Option<ScrapedPlayer> {
    let name = item.select(&PLAYER_NAME).next().map(text_of)?;
    let mut tokens = name.split_whitespace();
    let first_name = tokens.next()?.to_string();
    let last_name = tokens.collect::<Vec<_>>().join(" ");

    let mut player = ScrapedPlayer {
        first_name,
        last_name,
        position,
        nationality: DEFAULT_NATIONALITY.to_string(),
        date_of_birth: None,
        image_url: image_url(item),
    };

    for dl in item.select(&DETAILS) {
        let mut label: Option<String> = None;
        for child in dl.children().filter_map(ElementRef::wrap) {
            match child.value().name() {
                "dt" => label = Some(text_of(child).to_lowercase()),
                "dd" => {
                    let value = text_of(child);
                    match label.as_deref() {
                        Some("nasjonalitet") if !value.is_empty() => player.nationality = value,
                        Some("født") => player.date_of_birth = parse_norwegian_date(&value),
                        _ => {}
                    }
                }
                _ => {}
            }
        }
    }

    Some(player)
}

fn image_url(item: ElementRef) -> Option<String> {
    let from_style = |el: ElementRef| el.value().attr("style").and_then(css_url);

    item.select(&PLAYER_IMAGE)
        .next()
        .and_then(from_style)
        .or_else(|| {
            item.select(&IMG)
                .next()
                .and_then(|img| img.value().attr("src"))
                .map(str::to_string)
        })
        .or_else(|| item.select(&IMAGE_DIV).find_map(from_style))
}

fn css_url(style: &str) -> Option<String> {
    CSS_URL
        .captures(style)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|url| !url.is_empty())
}

fn text_of(element: ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "roster_scraper_test.rs"]
mod tests;
