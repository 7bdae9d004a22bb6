use spotify_profile_models::{
    AlbumDetail, AlbumTrack, NowPlaying, Page, Profile, SavedAlbum, TopArtist,
};

use crate::spotify_models::{
    Image, Paged, album::Album, album::SavedAlbumItem, artist::Artist, artist::ArtistRef,
    player::Player, profile, track::Track,
};

pub fn page<T>(paged: Paged<T>) -> Page<T> {
    Page {
        items: paged.items,
        total: paged.total,
        next: paged.next,
        previous: paged.previous,
    }
}

pub fn profile(raw: profile::Profile) -> Profile {
    Profile {
        display_name: raw.display_name.unwrap_or_else(|| raw.id.clone()),
        id: raw.id,
        email: raw.email,
        product: raw.product,
        avatar_url: first_image(&raw.images),
        profile_url: raw.external_urls.spotify,
    }
}

pub fn now_playing(raw: Player) -> Option<NowPlaying> {
    let item = raw.item?;

    Some(NowPlaying {
        track: item.name,
        artists: join_artists(&item.artists),
        album: item.album.name,
        album_art: first_image(&item.album.images),
        device: raw.device.map(|device| device.name),
    })
}

pub fn saved_album(item: SavedAlbumItem) -> SavedAlbum {
    let album = item.album;

    SavedAlbum {
        title: album.name,
        artist: join_artists(&album.artists),
        image: first_image(&album.images),
        url: album.external_urls.spotify,
        id: album.id,
    }
}

pub fn top_artist(raw: Artist) -> TopArtist {
    TopArtist {
        image: first_image(&raw.images),
        id: raw.id,
        name: raw.name,
        genres: raw.genres,
    }
}

pub fn album_detail(album: Album, tracks: Vec<Track>, artist: Option<Artist>) -> AlbumDetail {
    AlbumDetail {
        main_artist: album
            .artists
            .first()
            .map(|artist| artist.name.clone())
            .unwrap_or_default(),
        copyright: album.copyrights.first().map(|c| c.text.clone()),
        total_tracks: album.total_tracks,
        release_date: album.release_date,
        image: first_image(&album.images),
        artist_image: artist.as_ref().and_then(|a| first_image(&a.images)),
        tracks: tracks.into_iter().map(album_track).collect(),
        id: album.id,
        name: album.name,
    }
}

fn album_track(track: Track) -> AlbumTrack {
    AlbumTrack {
        artists: join_artists(&track.artists),
        id: track.id,
        name: track.name,
        duration_ms: track.duration_ms,
    }
}

fn join_artists(artists: &[ArtistRef]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn first_image(images: &[Image]) -> Option<String> {
    images.first().map(|image| image.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_falls_back_to_id_and_takes_first_image() {
        let raw: profile::Profile = serde_json::from_str(
            r#"{
                "id": "wizzler",
                "display_name": null,
                "email": "wizzler@example.com",
                "product": "premium",
                "images": [{ "url": "https://i.scdn.co/image/a" }],
                "external_urls": { "spotify": "https://open.spotify.com/user/wizzler" }
            }"#,
        )
        .unwrap();

        let profile = profile(raw);

        assert_eq!(profile.display_name, "wizzler");
        assert_eq!(profile.product.as_deref(), Some("premium"));
        assert_eq!(profile.avatar_url.as_deref(), Some("https://i.scdn.co/image/a"));
        assert_eq!(
            profile.profile_url.as_deref(),
            Some("https://open.spotify.com/user/wizzler")
        );
    }

    #[test]
    fn player_without_item_is_nothing_playing() {
        let raw: Player = serde_json::from_str(r#"{ "device": { "name": "Kitchen" } }"#).unwrap();

        assert_eq!(now_playing(raw), None);
    }

    #[test]
    fn playing_track_joins_artists() {
        let raw: Player = serde_json::from_str(
            r#"{
                "device": { "name": "Kitchen" },
                "is_playing": true,
                "item": {
                    "name": "Stolen Dance",
                    "artists": [{ "name": "Milky Chance" }, { "name": "Someone Else" }],
                    "album": {
                        "name": "Sadnecessary",
                        "images": [{ "url": "https://i.scdn.co/image/cover" }]
                    }
                }
            }"#,
        )
        .unwrap();

        let playing = now_playing(raw).unwrap();

        assert_eq!(playing.track, "Stolen Dance");
        assert_eq!(playing.artists, "Milky Chance, Someone Else");
        assert_eq!(playing.album_art.as_deref(), Some("https://i.scdn.co/image/cover"));
        assert_eq!(playing.device.as_deref(), Some("Kitchen"));
    }

    #[test]
    fn saved_albums_page_reshapes_envelope() {
        let raw: Paged<SavedAlbumItem> = serde_json::from_str(
            r#"{
                "items": [
                    {
                        "album": {
                            "id": "2up3OPMp9Tb4dAKM2erWXQ",
                            "name": "Blue Train",
                            "images": [{ "url": "https://i.scdn.co/image/blue" }],
                            "artists": [{ "id": "1", "name": "John Coltrane" }],
                            "external_urls": { "spotify": "https://open.spotify.com/album/x" }
                        }
                    }
                ],
                "total": 42,
                "next": "https://api.spotify.com/v1/me/albums?offset=20",
                "previous": null
            }"#,
        )
        .unwrap();

        let page = page(raw).map(saved_album);

        assert_eq!(page.total, 42);
        assert!(page.next.is_some());
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Blue Train");
        assert_eq!(page.items[0].artist, "John Coltrane");
    }

    #[test]
    fn album_detail_flattens_copyright_and_tracks() {
        let album: Album = serde_json::from_str(
            r#"{
                "id": "alb1",
                "name": "Abbey Road",
                "images": [{ "url": "https://i.scdn.co/image/cover" }],
                "artists": [{ "id": "art1", "name": "The Beatles" }],
                "copyrights": [{ "text": "(P) 1969", "type": "P" }],
                "release_date": "1969-09-26",
                "total_tracks": 17
            }"#,
        )
        .unwrap();
        let tracks: Vec<Track> = serde_json::from_str(
            r#"[
                {
                    "id": "t1",
                    "name": "Come Together",
                    "duration_ms": 259733,
                    "artists": [{ "name": "The Beatles" }]
                }
            ]"#,
        )
        .unwrap();
        let artist: Artist = serde_json::from_str(
            r#"{
                "id": "art1",
                "name": "The Beatles",
                "images": [{ "url": "https://i.scdn.co/image/artist" }]
            }"#,
        )
        .unwrap();

        let detail = album_detail(album, tracks, Some(artist));

        assert_eq!(detail.main_artist, "The Beatles");
        assert_eq!(detail.copyright.as_deref(), Some("(P) 1969"));
        assert_eq!(detail.total_tracks, 17);
        assert_eq!(detail.artist_image.as_deref(), Some("https://i.scdn.co/image/artist"));
        assert_eq!(detail.tracks.len(), 1);
        assert_eq!(detail.tracks[0].duration_ms, 259733);
    }

    #[test]
    fn top_artist_keeps_genres() {
        let raw: Artist = serde_json::from_str(
            r#"{
                "id": "art2",
                "name": "Tame Impala",
                "genres": ["neo-psychedelic", "australian psych"],
                "images": []
            }"#,
        )
        .unwrap();

        let artist = top_artist(raw);

        assert_eq!(artist.genres.len(), 2);
        assert_eq!(artist.image, None);
    }
}
