use super::*;
use crate::domain::services::test_support::{memory_db, seed_league, AWAY_TEAM, HOME_TEAM};
use crate::infrastructure::repositories::player_repo_impl::PlayerRepositoryImpl;
use crate::infrastructure::repositories::team_repo_impl::TeamRepositoryImpl;
use chrono::NaiveDate;

struct StaticSource(HashMap<String, String>);

#[async_trait]
impl RosterSource for StaticSource {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        self.0
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::Upstream(format!("GET {} returned 404", url)))
    }
}

const RBK_PAGE: &str = r#"
<div class="players">
  <h2>Angrepsspillere</h2>
  <ul>
    <li class="grid__item">
      <span class="player__name">Ola Hansen</span>
      <dl class="player__details"><dt>Født</dt><dd>3. mar. 1999</dd></dl>
    </li>
    <li class="grid__item">
      <span class="player__name">Ny Spiller</span>
      <dl class="player__details"><dt>Nasjonalitet</dt><dd>Sverige</dd></dl>
    </li>
  </ul>
  <h2>Midtbanespillere</h2>
  <ul>
    <li class="grid__item"><span class="player__name">Per Olsen</span></li>
  </ul>
  <h2>Utlånt</h2>
  <ul>
    <li class="grid__item"><span class="player__name">Ukjent Person</span></li>
  </ul>
</div>
"#;

fn scraped(position: Position) -> ScrapedPlayer {
    ScrapedPlayer {
        first_name: "Ola".to_string(),
        last_name: "Hansen".to_string(),
        position,
        nationality: DEFAULT_NATIONALITY.to_string(),
        date_of_birth: None,
        image_url: None,
    }
}

#[test]
fn test_should_update_rules() {
    let mut existing = Player::new("p1", "Ola", "Hansen");
    existing.position = Position::Forward;

    assert!(!should_update(&existing, &scraped(Position::Forward)));
    assert!(should_update(&existing, &scraped(Position::Defender)));

    let mut with_nationality = scraped(Position::Forward);
    with_nationality.nationality = "Sverige".to_string();
    assert!(should_update(&existing, &with_nationality));

    let mut with_birthday = scraped(Position::Forward);
    with_birthday.date_of_birth = NaiveDate::from_ymd_opt(1999, 3, 3);
    assert!(should_update(&existing, &with_birthday));

    let mut with_image = scraped(Position::Forward);
    with_image.image_url = Some("https://cdn.example.com/ola.png".to_string());
    assert!(should_update(&existing, &with_image));
}

#[test]
fn test_is_valid_new_player() {
    assert!(!is_valid_new_player(&scraped(Position::Undefined)));
    assert!(is_valid_new_player(&scraped(Position::Midfielder)));

    let mut no_last_name = scraped(Position::Midfielder);
    no_last_name.last_name = String::new();
    assert!(!is_valid_new_player(&no_last_name));

    let mut foreign = scraped(Position::Undefined);
    foreign.nationality = "Danmark".to_string();
    assert!(is_valid_new_player(&foreign));
}

#[tokio::test]
async fn test_sync_all_teams() {
    let db = memory_db().await;
    seed_league(&db).await;

    let teams = Arc::new(TeamRepositoryImpl::new(db.clone()));
    for (id, website) in [(HOME_TEAM, "https://www.rbk.no/"), (AWAY_TEAM, "https://www.moldefk.no")] {
        let mut team = teams.find_by_id(id).await.unwrap().unwrap();
        team.website = Some(website.to_string());
        teams.update(&team).await.unwrap();
    }

    let players = Arc::new(PlayerRepositoryImpl::new(db.clone()));
    let pages = HashMap::from([("https://www.rbk.no/lag".to_string(), RBK_PAGE.to_string())]);
    let service = RosterSyncService::new(
        teams,
        players.clone(),
        Arc::new(StaticSource(pages)),
        HashMap::new(),
    );

    let report = service.sync_all_teams().await.unwrap();

    assert_eq!(report.teams.len(), 2);
    let rbk = report.teams.iter().find(|t| t.team_id == HOME_TEAM).unwrap();
    assert!(rbk.error.is_none());
    assert_eq!(rbk.scraped, 4);
    assert_eq!(rbk.created, 1);
    // Ola gains a birthday; Per is unchanged
    assert_eq!(rbk.updated, 1);
    assert_eq!(rbk.unchanged, 1);
    assert_eq!(rbk.skipped, 1);
    assert!(rbk.departed.is_empty());

    let molde = report.teams.iter().find(|t| t.team_id == AWAY_TEAM).unwrap();
    assert!(molde.error.is_some());
    assert_eq!(report.failed_teams(), 1);

    let ola = players.find_by_id("p1").await.unwrap().unwrap();
    assert_eq!(ola.date_of_birth, NaiveDate::from_ymd_opt(1999, 3, 3));
    assert_eq!(ola.nationality.as_deref(), Some(DEFAULT_NATIONALITY));

    let roster = players.find_by_team(HOME_TEAM).await.unwrap();
    let newcomer = roster.iter().find(|p| p.first_name == "Ny").unwrap();
    assert!(newcomer.id.starts_with("player_ny_spiller_"));
    assert_eq!(newcomer.nationality.as_deref(), Some("Sverige"));
}

#[tokio::test]
async fn test_squad_url_override() {
    let db = memory_db().await;
    let mut team = Team::new("16", "Vålerenga", "VIF");
    team.website = Some("https://www.vif-fotball.no".to_string());

    let service = RosterSyncService::new(
        Arc::new(TeamRepositoryImpl::new(db.clone())),
        Arc::new(PlayerRepositoryImpl::new(db)),
        Arc::new(StaticSource(HashMap::new())),
        HashMap::from([(
            "16".to_string(),
            "https://www.vif-fotball.no/lag/a-laget/spillere".to_string(),
        )]),
    );

    assert_eq!(
        service.squad_url(&team).as_deref(),
        Some("https://www.vif-fotball.no/lag/a-laget/spillere")
    );

    team.id = "3".to_string();
    assert_eq!(
        service.squad_url(&team).as_deref(),
        Some("https://www.vif-fotball.no/lag")
    );

    team.website = None;
    assert_eq!(service.squad_url(&team), None);
}
