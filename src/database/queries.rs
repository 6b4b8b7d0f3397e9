pub mod entries {
    pub const SELECT_ALL_FOR_USER: &str = r#"
    SELECT e.date
         , e.uploaded_at
         , f.key
         , f.download_token
         , b.key
         , b.download_token
      FROM photo_entries AS e
      LEFT JOIN objects AS f ON f.key = e.front_key
      LEFT JOIN objects AS b ON b.key = e.back_key
     WHERE e.user_id = ?
     ORDER BY e.date DESC
    "#;

    pub const SELECT_BY_DATE: &str = r#"
    SELECT e.date
         , e.uploaded_at
         , f.key
         , f.download_token
         , b.key
         , b.download_token
      FROM photo_entries AS e
      LEFT JOIN objects AS f ON f.key = e.front_key
      LEFT JOIN objects AS b ON b.key = e.back_key
     WHERE e.user_id = ?
       AND e.date = ?
    "#;

    pub const SELECT_KEYS: &str = r#"
    SELECT front_key
         , back_key
      FROM photo_entries
     WHERE user_id = ?
       AND date = ?
    "#;

    pub const UPSERT_FRONT: &str = r#"
    INSERT INTO photo_entries (user_id, date, front_key, uploaded_at)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (user_id, date) DO UPDATE
       SET front_key = excluded.front_key
         , uploaded_at = excluded.uploaded_at
    "#;

    pub const UPSERT_BACK: &str = r#"
    INSERT INTO photo_entries (user_id, date, back_key, uploaded_at)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (user_id, date) DO UPDATE
       SET back_key = excluded.back_key
         , uploaded_at = excluded.uploaded_at
    "#;

    pub const DELETE_IF_EMPTY: &str = r#"
    DELETE FROM photo_entries
     WHERE user_id = ?
       AND date = ?
       AND front_key IS NULL
       AND back_key IS NULL
    "#;

    pub const DELETE: &str = r#"
    DELETE FROM photo_entries
     WHERE user_id = ?
       AND date = ?
    "#;
}

pub mod objects {
    pub const UPSERT: &str = r#"
    INSERT INTO objects (key, download_token, content_type, size_bytes, checksum)
    VALUES (?, ?, ?, ?, ?)
    ON CONFLICT (key) DO UPDATE
       SET download_token = excluded.download_token
         , content_type = excluded.content_type
         , size_bytes = excluded.size_bytes
         , checksum = excluded.checksum
         , created_at = strftime('%Y-%m-%dT%H:%M:%SZ', 'now')
    "#;

    pub const SELECT_BY_KEY: &str = r#"
    SELECT key
         , download_token
         , content_type
         , size_bytes
         , checksum
      FROM objects
     WHERE key = ?
    "#;

    pub const DELETE: &str = r#"
    DELETE FROM objects
     WHERE key = ?
    "#;
}

pub mod share_links {
    pub const SELECT_BY_USER: &str = r#"
    SELECT token
         , user_id
         , created_at
         , show_graph
         , show_photos
         , show_compare
         , is_active
      FROM share_links
     WHERE user_id = ?
    "#;

    pub const SELECT_BY_TOKEN: &str = r#"
    SELECT token
         , user_id
         , created_at
         , show_graph
         , show_photos
         , show_compare
         , is_active
      FROM share_links
     WHERE token = ?
    "#;

    pub const INSERT: &str = r#"
    INSERT INTO share_links (token, user_id, created_at, show_graph, show_photos, show_compare, is_active)
    VALUES (?, ?, ?, ?, ?, ?, 0)
    ON CONFLICT (user_id) DO NOTHING
    "#;

    pub const UPDATE_PERMISSIONS: &str = r#"
    UPDATE share_links
       SET show_graph = ?
         , show_photos = ?
         , show_compare = ?
     WHERE user_id = ?
    "#;

    pub const UPDATE_ACTIVE: &str = r#"
    UPDATE share_links
       SET is_active = ?
     WHERE user_id = ?
    "#;

    pub const ROTATE_TOKEN: &str = r#"
    UPDATE share_links
       SET token = ?
         , created_at = ?
         , is_active = 0
     WHERE user_id = ?
    "#;
}
