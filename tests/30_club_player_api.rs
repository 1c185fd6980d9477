mod common;

use anyhow::Result;
use serde_json::{json, Value};

use common::{unique_email, TestServer};

struct Club {
    id: i64,
    token: String,
}

async fn registered_club(server: &TestServer, name: &str) -> Result<Club> {
    let email = unique_email("club");
    let (status, body) = server.post_form("/api/club/registration", None, common::club_form(&email, name)).await?;
    anyhow::ensure!(status == 200, "club registration failed: {}", body);
    let (id, token) = common::login(server, "club", &email).await?;
    Ok(Club { id, token })
}

/// Registers a player against the club and returns `(player_id, email)`.
async fn pending_player(server: &TestServer, club: &Club, name: &str) -> Result<(i64, String)> {
    let email = unique_email("player");
    let (status, body) = server
        .post_form("/api/player/registration", None, common::player_form(club.id, &email, name))
        .await?;
    anyhow::ensure!(status == 200, "player registration failed: {}", body);
    let id = body["data"]["playerId"].as_i64().unwrap_or_default();
    Ok((id, email))
}

async fn club_call(server: &TestServer, club: &Club, op: &str, mut body: Value) -> Result<(u16, Value)> {
    body["clubId"] = json!(club.id);
    server.post_json(&format!("/api/club/{}", op), Some(&club.token), body).await
}

fn ids(body: &Value, key: &str) -> Vec<i64> {
    body["data"]
        .as_array()
        .map(|rows| rows.iter().filter_map(|row| row[key].as_i64()).collect())
        .unwrap_or_default()
}

#[tokio::test]
async fn player_waits_for_approval_before_logging_in() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let club = registered_club(&server, "Harbour Rovers").await?;
    let (player_id, email) = pending_player(&server, &club, "Sam Striker").await?;

    let (status, body) = server
        .post_json("/api/player/login", None, json!({"playerEmail": email, "playerPassword": common::PASSWORD}))
        .await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Player not found");

    let (_, body) = club_call(&server, &club, "viewAllUnapprovedPlayers", json!({})).await?;
    assert_eq!(ids(&body, "playerId"), vec![player_id]);
    assert_eq!(body["data"][0]["clubName"], "Harbour Rovers");
    assert_eq!(body["data"][0]["managerName"], "Morgan Manager");

    let (status, body) = club_call(&server, &club, "approveOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["message"], "Player approved successfully");
    assert_eq!(body["data"]["isApproved"], true);

    let (status, body) = club_call(&server, &club, "approveOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Player not found or already approved");

    let (player_login_id, _) = common::login(&server, "player", &email).await?;
    assert_eq!(player_login_id, player_id);

    let (_, body) = club_call(&server, &club, "viewAllUnapprovedPlayers", json!({})).await?;
    assert!(ids(&body, "playerId").is_empty());
    let (_, body) = club_call(&server, &club, "viewAllPlayers", json!({})).await?;
    assert_eq!(ids(&body, "playerId"), vec![player_id]);
    Ok(())
}

#[tokio::test]
async fn clubs_cannot_touch_each_others_players() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let home = registered_club(&server, "Home Town").await?;
    let away = registered_club(&server, "Away Town").await?;
    let (player_id, _) = pending_player(&server, &home, "Pat Keeper").await?;

    let (status, body) = club_call(&server, &away, "approveOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Player not found or already approved");

    let (status, _) = club_call(&server, &away, "viewOneUnapprovedPlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 422);
    Ok(())
}

#[tokio::test]
async fn suspension_moves_player_between_lists() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let club = registered_club(&server, "Valley Athletic").await?;
    let (player_id, email) = pending_player(&server, &club, "Jo Winger").await?;
    club_call(&server, &club, "approveOnePlayer", json!({"playerId": player_id})).await?;

    let (status, body) = club_call(&server, &club, "suspendOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 200, "{}", body);

    let (_, body) = club_call(&server, &club, "viewAllPlayers", json!({})).await?;
    assert!(ids(&body, "playerId").is_empty());
    let (_, body) = club_call(&server, &club, "viewAllSuspendedPlayers", json!({})).await?;
    assert_eq!(ids(&body, "playerId"), vec![player_id]);

    let (status, body) = server
        .post_json("/api/player/login", None, json!({"playerEmail": email, "playerPassword": common::PASSWORD}))
        .await?;
    assert_eq!(status, 422, "{}", body);

    let (status, body) = club_call(&server, &club, "suspendOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Player not found or already suspended");

    let (status, _) = club_call(&server, &club, "unSuspendOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 200);
    let (_, body) = club_call(&server, &club, "viewAllSuspendedPlayers", json!({})).await?;
    assert!(ids(&body, "playerId").is_empty());
    let (_, body) = club_call(&server, &club, "viewAllPlayers", json!({})).await?;
    assert_eq!(ids(&body, "playerId"), vec![player_id]);

    let (status, body) = club_call(&server, &club, "unSuspendOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Player not found or not suspended");
    Ok(())
}

#[tokio::test]
async fn search_and_injury_updates() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let club = registered_club(&server, "Lakeside United").await?;
    let (striker, _) = pending_player(&server, &club, "Robin Forward").await?;
    let (keeper, _) = pending_player(&server, &club, "Casey Gloves").await?;
    for id in [striker, keeper] {
        club_call(&server, &club, "approveOnePlayer", json!({"playerId": id})).await?;
    }

    let (status, body) = club_call(&server, &club, "searchPlayers", json!({"searchQuery": "  "})).await?;
    assert_eq!(status, 400);
    assert_eq!(body["results"]["searchQuery"][0], "Search query is required");

    let (status, body) = club_call(&server, &club, "searchPlayers", json!({"searchQuery": "robin"})).await?;
    assert_eq!(status, 200);
    assert_eq!(ids(&body, "playerId"), vec![striker]);

    let (status, body) = club_call(
        &server,
        &club,
        "addOneInjuryUpdate",
        json!({"playerId": keeper, "injuryType": "Sprained wrist", "averageRecoveryTime": "3 weeks"}),
    )
    .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["message"], "Injury details submitted successfully");
    assert_eq!(body["data"]["playerName"], "Casey Gloves");
    assert_eq!(body["data"]["clubName"], "Lakeside United");

    let (_, body) = club_call(&server, &club, "viewOnePlayer", json!({"playerId": keeper})).await?;
    assert_eq!(body["data"]["isInjured"], true);
    Ok(())
}

#[tokio::test]
async fn notifications_and_leave_requests_flow_both_ways() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let club = registered_club(&server, "Riverside City").await?;
    let (player_id, email) = pending_player(&server, &club, "Alex Midfield").await?;
    club_call(&server, &club, "approveOnePlayer", json!({"playerId": player_id})).await?;
    let (_, player_token) = common::login(&server, "player", &email).await?;

    let (status, body) = club_call(
        &server,
        &club,
        "sendNotificationToPlayer",
        json!({"playerId": player_id, "message": "Training moved to 6pm"}),
    )
    .await?;
    assert_eq!(status, 200, "{}", body);

    let (_, body) = server
        .post_json("/api/player/viewAllNotifications", Some(&player_token), json!({"playerId": player_id}))
        .await?;
    assert_eq!(body["data"][0]["message"], "Training moved to 6pm");
    let notification_id = body["data"][0]["notificationId"].as_i64().expect("notification id");

    let (status, _) = server
        .post_json(
            "/api/player/viewOneNotification",
            Some(&player_token),
            json!({"playerId": player_id, "notificationId": notification_id}),
        )
        .await?;
    assert_eq!(status, 200);

    let (status, body) = server
        .post_json(
            "/api/player/sendLeaveRequestToClub",
            Some(&player_token),
            json!({"playerId": player_id, "message": "Family wedding on Saturday"}),
        )
        .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["playerName"], "Alex Midfield");
    let leave_id = body["data"]["leaveRequestId"].as_i64().expect("leave request id");

    let (_, body) = club_call(&server, &club, "viewAllLeaveRequests", json!({})).await?;
    assert_eq!(ids(&body, "leaveRequestId"), vec![leave_id]);

    let (status, body) =
        club_call(&server, &club, "approveOneLeaveRequest", json!({"leaveRequestId": leave_id})).await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["isApproved"], true);

    let (_, body) = club_call(&server, &club, "viewAllLeaveRequests", json!({})).await?;
    assert!(ids(&body, "leaveRequestId").is_empty());

    let (_, body) = server
        .post_json(
            "/api/player/viewAllApprovedLeaveRequests",
            Some(&player_token),
            json!({"playerId": player_id}),
        )
        .await?;
    assert_eq!(ids(&body, "leaveRequestId"), vec![leave_id]);
    Ok(())
}

#[tokio::test]
async fn failed_upload_leaves_no_account_and_no_files() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    server.store.fail_from_put(2);
    let email = unique_email("club");

    let (status, body) = server
        .post_form("/api/club/registration", None, common::club_form(&email, "Broken Uploads"))
        .await?;
    assert_eq!(status, 500);
    assert_eq!(body["status"], "error");
    assert!(server.store.keys().is_empty());

    let (status, body) = server
        .post_json("/api/club/login", None, json!({"clubEmail": email, "clubPassword": common::PASSWORD}))
        .await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Club not found");
    assert!(server.mailer.sent_to(&email).is_empty());
    Ok(())
}

#[tokio::test]
async fn public_club_list_feeds_player_registration() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let club = registered_club(&server, "Northgate Albion").await?;

    let (status, body) = server.post_json("/api/player/viewAllClubs", None, json!({})).await?;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "All clubs are retrieved successfully");
    assert!(ids(&body, "clubId").contains(&club.id));
    assert!(body["data"][0].get("clubEmail").is_none());
    Ok(())
}

#[tokio::test]
async fn registration_against_unknown_club_is_rolled_back() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let email = unique_email("player");

    let (status, body) = server
        .post_form("/api/player/registration", None, common::player_form(i64::MAX, &email, "Lost Player"))
        .await?;
    assert_eq!(status, 422);
    assert_eq!(body["message"], "Registration failed");
    assert_eq!(body["error"], "Club not found");
    assert!(server.store.keys().is_empty());
    Ok(())
}

#[tokio::test]
async fn deleted_player_is_gone_for_good() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let club = registered_club(&server, "Eastfield Town").await?;
    let (player_id, email) = pending_player(&server, &club, "Drew Defender").await?;
    club_call(&server, &club, "approveOnePlayer", json!({"playerId": player_id})).await?;

    let (status, body) = club_call(&server, &club, "deleteOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["message"], "Player deleted successfully");

    let (_, body) = club_call(&server, &club, "viewAllPlayers", json!({})).await?;
    assert!(ids(&body, "playerId").is_empty());
    let (status, _) = club_call(&server, &club, "viewOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 422);

    let (status, body) = server
        .post_json("/api/player/login", None, json!({"playerEmail": email, "playerPassword": common::PASSWORD}))
        .await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Player not found");

    let (status, body) = club_call(&server, &club, "deleteOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 422);
    assert_eq!(body["message"], "Player deletion failed");
    assert_eq!(body["error"], "Player not found or already deleted");
    Ok(())
}

#[tokio::test]
async fn suspended_club_is_refused_before_its_players_are_touched() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let club = registered_club(&server, "Westbrook Rangers").await?;
    let (player_id, _) = pending_player(&server, &club, "Kit Fullback").await?;

    sqlx::query("UPDATE clubs SET is_suspended = TRUE, is_active = FALSE WHERE club_id = $1")
        .bind(club.id)
        .execute(&server.state.db)
        .await?;

    let (status, body) = club_call(&server, &club, "approveOnePlayer", json!({"playerId": player_id})).await?;
    assert_eq!(status, 422);
    assert_eq!(body["message"], "Access denied");
    assert_eq!(body["error"], "Club not found");

    let (approved,): (bool,) = sqlx::query_as("SELECT is_approved FROM players WHERE player_id = $1")
        .bind(player_id)
        .fetch_one(&server.state.db)
        .await?;
    assert!(!approved);

    let (status, body) = server.post_json("/api/player/viewAllClubs", None, json!({})).await?;
    assert_eq!(status, 200);
    assert!(!ids(&body, "clubId").contains(&club.id));

    let late = common::player_form(club.id, &unique_email("late"), "Late Signing");
    let (status, body) = server.post_form("/api/player/registration", None, late).await?;
    assert_eq!(status, 422, "{}", body);
    assert_eq!(body["error"], "Club not found");
    Ok(())
}

#[tokio::test]
async fn club_profile_and_password_round_trip() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let email = unique_email("club");
    server.post_form("/api/club/registration", None, common::club_form(&email, "Old Name FC")).await?;
    let (club_id, token) = common::login(&server, "club", &email).await?;
    let club = Club { id: club_id, token };
    let (player_id, _) = pending_player(&server, &club, "Rory Sweeper").await?;

    let (status, body) = club_call(
        &server,
        &club,
        "updateProfile",
        json!({
            "clubName": "New Name FC",
            "clubAddress": "South Stand Road",
            "managerName": "Jordan Coach",
            "managerMobile": "91234 56789"
        }),
    )
    .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["message"], "Club updated successfully");
    assert_eq!(body["data"]["clubName"], "New Name FC");
    assert_eq!(body["data"]["managerMobile"], "9123456789");

    let (_, body) = club_call(&server, &club, "viewProfile", json!({})).await?;
    assert_eq!(body["data"]["managerName"], "Jordan Coach");
    let (_, body) = club_call(&server, &club, "viewOneUnapprovedPlayer", json!({"playerId": player_id})).await?;
    assert_eq!(body["data"]["clubName"], "Old Name FC");

    let (status, body) = club_call(
        &server,
        &club,
        "changePassword",
        json!({"oldPassword": common::PASSWORD, "newPassword": "Changed#789"}),
    )
    .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["message"], "Password changed successfully");

    let (status, body) = server
        .post_json("/api/club/login", None, json!({"clubEmail": email, "clubPassword": common::PASSWORD}))
        .await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Wrong password");
    let (status, _) = server
        .post_json("/api/club/login", None, json!({"clubEmail": email, "clubPassword": "Changed#789"}))
        .await?;
    assert_eq!(status, 200);
    Ok(())
}

#[tokio::test]
async fn player_profile_and_password_round_trip() -> Result<()> {
    let Some(server) = common::spawn_with_database().await? else {
        return Ok(());
    };
    let club = registered_club(&server, "Meadow Park").await?;
    let (player_id, email) = pending_player(&server, &club, "Quinn Playmaker").await?;
    club_call(&server, &club, "approveOnePlayer", json!({"playerId": player_id})).await?;
    let (_, token) = common::login(&server, "player", &email).await?;

    let (status, body) = server
        .post_json(
            "/api/player/updateProfile",
            Some(&token),
            json!({
                "playerId": player_id,
                "playerName": "Quinn Captain",
                "playerMobile": "91234 56789",
                "playerAddress": "9 Corner Flag Close",
                "playerAge": "27",
                "playerPosition": "Midfielder",
                "playerCountry": "Spain"
            }),
        )
        .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["message"], "Player updated successfully");
    assert_eq!(body["data"]["playerName"], "Quinn Captain");
    assert_eq!(body["data"]["playerAge"], 27);

    let (status, body) = server
        .post_json(
            "/api/player/changePassword",
            Some(&token),
            json!({"playerId": player_id, "oldPassword": "Wrong#Pass1", "newPassword": "Changed#789"}),
        )
        .await?;
    assert_eq!(status, 422);
    assert_eq!(body["error"], "Incorrect old password");

    let (status, body) = server
        .post_json(
            "/api/player/changePassword",
            Some(&token),
            json!({"playerId": player_id, "oldPassword": common::PASSWORD, "newPassword": "Changed#789"}),
        )
        .await?;
    assert_eq!(status, 200, "{}", body);

    let (status, body) = server
        .post_json("/api/player/login", None, json!({"playerEmail": email, "playerPassword": "Changed#789"}))
        .await?;
    assert_eq!(status, 200, "{}", body);
    assert_eq!(body["data"]["player"]["playerName"], "Quinn Captain");
    Ok(())
}
