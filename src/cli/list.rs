//! `multiverse list`: print one filtered page of characters and exit.

use std::collections::HashMap;
use std::error::Error;
use std::io::Write;

use futures_util::future::join_all;
use tracing::warn;

use crate::api::{Character, CharacterApi};
use crate::core::episodes::{first_episode_url, resolve_first_episode_name, EpisodeLabel};
use crate::core::fetcher::{fetch_page, FetchedPage};
use crate::core::filter::{apply_filters, FilterField, FilterSelection};

pub async fn list_characters(
    api: &dyn CharacterApi,
    page: u32,
    selection: &FilterSelection,
    with_episodes: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let fetched = fetch_page(api, page).await?;
    let visible = apply_filters(&fetched.characters, selection);

    let episode_names = if with_episodes {
        resolve_episode_names(api, &visible).await
    } else {
        HashMap::new()
    };

    writeln!(out, "{}", summary_line(&fetched, selection, visible.len()))?;
    if visible.is_empty() {
        writeln!(out, "No characters match the current filters.")?;
        return Ok(());
    }

    for character in &visible {
        let mut line = character_line(character);
        if with_episodes {
            let label = match first_episode_url(character) {
                Some(url) => episode_names.get(url).cloned().unwrap_or(EpisodeLabel::Loading),
                None => EpisodeLabel::NoData,
            };
            line.push_str(&format!("  |  First seen in: {label}"));
        }
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Look up every distinct first episode concurrently. Failed lookups are
/// left out and shown with the loading text.
async fn resolve_episode_names(
    api: &dyn CharacterApi,
    visible: &[Character],
) -> HashMap<String, EpisodeLabel> {
    let mut urls: Vec<String> = Vec::new();
    for url in visible.iter().filter_map(first_episode_url) {
        if !urls.iter().any(|seen| seen == url) {
            urls.push(url.to_string());
        }
    }

    let lookups = urls
        .iter()
        .map(|url| resolve_first_episode_name(api, std::slice::from_ref(url)));
    let results = join_all(lookups).await;

    urls.into_iter()
        .zip(results)
        .filter_map(|(url, result)| match result {
            Ok(label) => Some((url, label)),
            Err(err) => {
                warn!(url = %url, error = %err, "episode lookup failed");
                None
            }
        })
        .collect()
}

fn summary_line(fetched: &FetchedPage, selection: &FilterSelection, shown: usize) -> String {
    let mut line = format!("Page {}", fetched.page);
    if let Some(info) = &fetched.info {
        line.push_str(&format!(" of {}", info.pages));
    }
    line.push_str(&format!(
        " · {} of {} characters · Status: {} · Gender: {}",
        shown,
        fetched.characters.len(),
        selection.get(FilterField::Status),
        selection.get(FilterField::Gender),
    ));
    line
}

fn character_line(character: &Character) -> String {
    format!(
        "{:>4}  {}  |  {} - {}  |  {}  |  Last known location: {}",
        character.id,
        character.name,
        character.status,
        character.species,
        character.gender,
        character.location.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::{episode_url, sample_character, with_episodes, FakeApi};

    fn page() -> Vec<Character> {
        vec![
            sample_character(1, "Rick Sanchez", "Alive", "Male"),
            sample_character(2, "Morty Smith", "Alive", "Male"),
            with_episodes(
                sample_character(3, "Birdperson", "Dead", "Male"),
                &[episode_url(11)],
            ),
            with_episodes(sample_character(4, "Summer Smith", "Alive", "Female"), &[]),
        ]
    }

    async fn run(api: &FakeApi, selection: FilterSelection, episodes: bool) -> String {
        let mut out = Vec::new();
        list_characters(api, 1, &selection, episodes, &mut out)
            .await
            .expect("list");
        String::from_utf8(out).expect("utf8")
    }

    #[tokio::test]
    async fn prints_filtered_characters() {
        let api = FakeApi::new().with_page(1, page());
        let output = run(&api, FilterSelection::new("Alive", "Male"), false).await;
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(
            lines[0],
            "Page 1 · 2 of 4 characters · Status: Alive · Gender: Male"
        );
        assert_eq!(
            lines[1],
            "   1  Rick Sanchez  |  Alive - Human  |  Male  |  Last known location: Earth (C-137)"
        );
        assert!(lines[2].contains("Morty Smith"));
        assert_eq!(lines.len(), 3);
        assert!(api.episode_calls().is_empty());
    }

    #[tokio::test]
    async fn episodes_are_fetched_once_per_distinct_url() {
        let api = FakeApi::new()
            .with_page(1, page())
            .with_episode(&episode_url(1), "Pilot");
        let output = run(&api, FilterSelection::default(), true).await;

        assert!(output.contains("Rick Sanchez  |  Alive - Human  |  Male  |  Last known location: Earth (C-137)  |  First seen in: Pilot"));
        assert!(output.contains("Birdperson  |  Dead - Human  |  Male  |  Last known location: Earth (C-137)  |  First seen in: Loading episode..."));
        assert!(output.contains("First seen in: No episode data"));

        let mut calls = api.episode_calls();
        calls.sort();
        assert_eq!(calls, vec![episode_url(1), episode_url(11)]);
    }

    #[tokio::test]
    async fn empty_result_says_so() {
        let api = FakeApi::new().with_page(1, page());
        let output = run(&api, FilterSelection::new("unknown", "All"), false).await;
        assert!(output.ends_with("No characters match the current filters.\n"));
    }

    #[tokio::test]
    async fn fetch_failure_is_an_error() {
        let api = FakeApi::new();
        let mut out = Vec::new();
        let err = list_characters(&api, 5, &FilterSelection::default(), false, &mut out)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
        assert!(out.is_empty());
    }
}
