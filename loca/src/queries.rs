//! Parameterized SQL templates, one per resource.
//!
//! Bind order is part of each template's contract and is noted above it.
//! Output columns must match the `COLUMNS` of the record the template feeds.
//! Position times are cast to `timestamp` so that `timestamptz` columns decode
//! too; sqlx sessions run with `TimeZone=UTC`.

pub const SELECT_TRIPS: &str = r#"
SELECT t.id AS t_id,
       t.trip_name AS trip_name,
       t.trip_date AS trip_date,
       t.vessel_name AS vessel_name,
       u.user_email AS user_email
FROM trip t
JOIN users u ON t.user_id = u.id
ORDER BY t.trip_date DESC, t.id;
"#;

/// $1 = trip id
pub const SELECT_TRIP: &str = r#"
SELECT t.id AS t_id,
       t.trip_name AS trip_name,
       t.trip_date AS trip_date,
       t.vessel_name AS vessel_name,
       u.user_email AS user_email
FROM trip t
JOIN users u ON t.user_id = u.id
WHERE t.id = $1;
"#;

/// $1 = trip id, $2 = mPerPix, $3..$4 = lat0, lat1, $5..$6 = lon0, lon1
pub const SELECT_TRIP_POINTS: &str = r#"
SELECT p.id AS p_id,
       p.pos_time_utc::timestamp AS t_utc,
       p.latitude AS lat,
       p.longitude AS lon,
       p.erroneous AS pos_bad,
       wsp.id AS ws_id,
       wsp.speed AS ws,
       gsc.id AS gs_id,
       gsc.speed AS gs,
       gsc.course AS course,
       gsc.erroneous AS gs_bad
FROM position p
JOIN water_speed wsp ON p.id = wsp.position_id
JOIN ground_speed_course gsc ON p.id = gsc.position_id
WHERE p.trip_id = $1
  AND p.display_range >= get_display_range($2)
  AND p.latitude > $3 AND p.latitude < $4
  AND p.longitude > $5 AND p.longitude < $6
ORDER BY p.id;
"#;

/// $1..$2 = lat0, lat1, $3..$4 = lon0, lon1, $5 = mPerPix
pub const SELECT_DEPTHS: &str = r#"
SELECT d.id AS d_id,
       p.id AS p_id,
       p.trip_id AS t_id,
       p.pos_time_utc::timestamp AS t_utc,
       p.latitude AS lat,
       p.longitude AS lon,
       d.depth AS depth,
       d.erroneous AS d_bad
FROM position p
JOIN depth d ON p.id = d.position_id
WHERE p.latitude > $1 AND p.latitude < $2
  AND p.longitude > $3 AND p.longitude < $4
  AND d.display_range >= get_display_range($5)
ORDER BY p.id;
"#;
