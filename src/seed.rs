use sqlx::PgPool;
use tracing::info;

// title, artist, album, image_url, file_url, genre, duration, release_year
const SAMPLE_SONGS: &[(&str, &str, &str, &str, &str, &str, i32, i32)] = &[
    (
        "Shape of You",
        "Ed Sheeran",
        "÷ (Divide)",
        "https://i.scdn.co/image/ab67616d0000b273ba5db46f4b838ef6027e6f96",
        "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3",
        "Pop",
        235,
        2017,
    ),
    (
        "Blinding Lights",
        "The Weeknd",
        "After Hours",
        "https://i.scdn.co/image/ab67616d0000b2738863bc11d2aa12b54f5aeb36",
        "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-2.mp3",
        "Synth-pop",
        201,
        2020,
    ),
    (
        "Bad Guy",
        "Billie Eilish",
        "When We All Fall Asleep, Where Do We Go?",
        "https://i.scdn.co/image/ab67616d0000b2732a038d3bf875d23e4aeaa84e",
        "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-3.mp3",
        "Electropop",
        194,
        2019,
    ),
    (
        "Uptown Funk",
        "Mark Ronson ft. Bruno Mars",
        "Uptown Special",
        "https://i.scdn.co/image/ab67616d0000b273e4c03df7fc46eeb9a76553f5",
        "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-4.mp3",
        "Funk",
        270,
        2015,
    ),
    (
        "Someone Like You",
        "Adele",
        "21",
        "https://i.scdn.co/image/ab67616d0000b273c7ab3ed9a4b4d02b95a9c9f1",
        "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-5.mp3",
        "Soul",
        285,
        2011,
    ),
];

/// Loads the demo catalog into an empty songs table so a fresh database has
/// something to serve.
pub async fn seed_songs(db: &PgPool) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(db)
        .await?;
    if count > 0 {
        return Ok(());
    }

    for (title, artist, album, image_url, file_url, genre, duration, release_year) in SAMPLE_SONGS
    {
        sqlx::query(
            "INSERT INTO songs (title, artist, album, image_url, file_url, genre, duration, release_year)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(title)
        .bind(artist)
        .bind(album)
        .bind(image_url)
        .bind(file_url)
        .bind(genre)
        .bind(duration)
        .bind(release_year)
        .execute(db)
        .await?;
    }

    info!(inserted = SAMPLE_SONGS.len(), "seeded demo song catalog");
    Ok(())
}
