//! Integration tests for the front-desk commands.
//!
//! These tests drive whole stays through the binary: booking, room service,
//! check-out, expiry of no-shows, listings and reports.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// ============================================================================
// Stays
// ============================================================================

#[test]
fn test_walk_in_order_and_check_out() {
    let env = TestEnv::new();
    env.add_guest("G1");
    env.add_room(2, 5, "standard");
    env.add_menu_item("Nasi Lemak", "6.5");

    let code = env.walk_in("G1", "standard");
    assert!(code.ends_with("-G1"), "unexpected code {code}");

    env.command()
        .args(["room", "list", "--status", "occupied"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0205"));

    let order_id = env.run(&[
        "order",
        &code,
        "--item",
        "nasi lemak=2",
        "--remarks",
        "extra sambal",
    ]);
    assert!(order_id.ends_with("-0205"), "unexpected order id {order_id}");

    env.command()
        .args(["order-status", &order_id])
        .assert()
        .success()
        .stdout("PREPARING\n");
    env.command()
        .args(["order-status", &order_id])
        .assert()
        .success()
        .stdout("DELIVERED\n");
    env.command()
        .args(["order-status", &order_id])
        .assert()
        .code(1);

    // the preview leaves the stay running
    env.command()
        .args(["check-out", &code, "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Room service:       S$13.00"));
    env.command()
        .args(["room", "list", "--status", "occupied"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0205"));

    env.command()
        .args(["check-out", &code])
        .assert()
        .success()
        .stdout(predicate::str::contains("Service charge 7%"))
        .stdout(predicate::str::contains("Total:"));

    env.command()
        .args(["reservations", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("{code},CHECKED_OUT,G1,0205")));
    env.command()
        .args(["room", "list", "--status", "vacant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0205"));
}

#[test]
fn test_order_requires_checked_in_reservation() {
    let env = TestEnv::new();
    env.add_guest("G1");
    env.add_room(2, 5, "standard");
    env.add_menu_item("Kopi", "1.8");
    let code = env.run(&[
        "reserve",
        "--guest",
        "G1",
        "--type",
        "standard",
        "--check-in",
        "2099-01-01 1400",
        "--check-out",
        "2099-01-03 1200",
        "--adults",
        "2",
    ]);

    env.command()
        .args(["order", &code, "--item", "Kopi"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot order room service"));
}

#[test]
fn test_no_show_is_expired() {
    let env = TestEnv::new();
    env.add_guest("G1");
    env.add_room(2, 5, "deluxe");

    // a booking whose check-in has long passed
    let rooms = std::fs::read_to_string(env.file("room.txt")).unwrap();
    std::fs::write(
        env.file("room.txt"),
        rooms.replace("status\tVACANT", "status\tRESERVED"),
    )
    .unwrap();
    std::fs::write(
        env.file("reservation.txt"),
        "reservationCode\t20200101-90-G1\n\
         reservationStatus\tCONFIRMED\n\
         numberOfChildren\t0\n\
         numberOfAdult\t1\n\
         checkInDate\t2020-01-02 1400\n\
         checkOutDate\t2020-01-04 1200\n\
         guestId\tG1\n\
         roomId\t0205",
    )
    .unwrap();

    env.command()
        .args(["expire", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Would expire 1 reservation(s)"));

    env.command()
        .args(["--verbose", "expire"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Expired 1 reservation(s)"))
        .stderr(predicate::str::contains("20200101-90-G1"));

    env.command()
        .args(["reservations", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"EXPIRED\""));
    env.command()
        .args(["room", "list", "--status", "vacant"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0205"));
}

#[test]
fn test_unexpirable_reservation_is_reported_and_skipped() {
    let env = TestEnv::new();
    env.add_guest("G1");
    env.add_room(2, 5, "deluxe");

    std::fs::write(
        env.file("reservation.txt"),
        "reservationCode\t20200101-90-G1\n\
         reservationStatus\tCONFIRMED\n\
         numberOfChildren\t0\n\
         numberOfAdult\t1\n\
         checkInDate\t2020-01-02 0800\n\
         checkOutDate\t2020-01-02 2300\n\
         guestId\tG1\n\
         roomId\t0205",
    )
    .unwrap();

    env.command()
        .arg("expire")
        .assert()
        .success()
        .stderr(predicate::str::contains("Expired 0 reservation(s)"))
        .stderr(predicate::str::contains("could not expire 20200101-90-G1"));

    env.command()
        .args(["reservations", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20200101-90-G1,CONFIRMED"));
}

// ============================================================================
// Listings and reports
// ============================================================================

#[test]
fn test_reservations_json_and_filters() {
    let env = TestEnv::new();
    env.add_guest("G1");
    env.add_guest("G2");
    env.add_room(2, 5, "single");
    env.add_room(2, 6, "single");
    let first = env.walk_in("G1", "single");
    env.walk_in("G2", "single");

    let output = env
        .command()
        .args(["reservations", "--format", "json", "--guest", "g1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["code"], first.as_str());
    assert_eq!(rows[0]["status"], "CHECKED_IN");
    assert_eq!(rows[0]["room"], "0205");

    env.command()
        .args(["reservations", "--room", "0206"])
        .assert()
        .success()
        .stdout(predicate::str::contains("G2"))
        .stdout(predicate::str::contains("G1").not());
}

#[test]
fn test_report_counts_and_occupancy() {
    let env = TestEnv::new();
    env.add_guest("G1");
    env.add_room(2, 5, "single");
    env.add_room(2, 6, "single");
    env.add_room(3, 1, "vip");
    env.run(&["room", "maintenance", "0301"]);
    env.walk_in("G1", "single");

    let output = env
        .command()
        .args(["report", "--status", "occupied", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    let counts = json["status_counts"].as_array().unwrap();
    let count_of = |status: &str| {
        counts
            .iter()
            .find(|c| c["status"] == status)
            .map(|c| c["count"].as_u64().unwrap())
            .unwrap()
    };
    assert_eq!(count_of("VACANT"), 1);
    assert_eq!(count_of("OCCUPIED"), 1);
    assert_eq!(count_of("UNDER_MAINTENANCE"), 1);

    let single = json["occupancy"]
        .as_array()
        .unwrap()
        .iter()
        .find(|line| line["room_type"] == "SINGLE")
        .unwrap();
    assert_eq!(single["matching"], serde_json::json!(["0205"]));
    assert_eq!(single["other"], serde_json::json!(["0206"]));

    env.run(&["room", "vacate", "0301"]);
    env.command()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("UNDER_MAINTENANCE\t0"));
}

#[test]
fn test_guest_and_menu_listings() {
    let env = TestEnv::new();
    env.add_guest("G1");
    env.add_menu_item("Kaya Toast", "3");
    env.add_menu_item("Kopi", "1.8");

    env.command()
        .args(["guest", "list", "--name", "ah kow"])
        .assert()
        .success()
        .stdout(predicate::str::contains("G1\tTan Ah Kow\tPASSPORT"));

    env.command()
        .args(["menu", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kaya Toast\tS$3.00"))
        .stdout(predicate::str::contains("Kopi\tS$1.80"));

    // names are unique
    env.command()
        .args(["menu", "add", "--name", "Kopi", "--price", "2"])
        .assert()
        .code(1);
}
