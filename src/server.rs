use std::convert::Infallible;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use warp::http::StatusCode;
use warp::Filter;

use crate::model::{
    HealthResponse, LeaderboardResponse, SearchResponse, StatusResponse, UpdateRequest,
    RATING_MAX, RATING_MIN,
};
use crate::Leaderboard;

const DEFAULT_LIMIT: usize = 100;

#[derive(Debug, Deserialize)]
struct PageParams {
    limit: Option<usize>,
    offset: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

pub async fn run_server(board: Arc<Leaderboard>, port: u16) {
    // 1. GET /api/leaderboard?limit=&offset=
    let leaderboard = warp::get()
        .and(warp::path!("api" / "leaderboard"))
        .and(warp::query::<PageParams>())
        .and(with_board(board.clone()))
        .and_then(|params: PageParams, board: Arc<Leaderboard>| async move {
            let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
            let offset = params.offset.unwrap_or(0);
            let users = board.get_range(limit, offset);
            let total = board.count();
            let reply = warp::reply::json(&LeaderboardResponse {
                users,
                total,
                limit,
                offset,
            });
            Ok::<_, warp::Rejection>(warp::reply::with_status(reply, StatusCode::OK))
        });

    // 2. GET /api/search?q=
    let search = warp::get()
        .and(warp::path!("api" / "search"))
        .and(warp::query::<SearchParams>())
        .and(with_board(board.clone()))
        .and_then(|params: SearchParams, board: Arc<Leaderboard>| async move {
            let reply = match params.q {
                Some(query) => {
                    let users = board.search(&query);
                    let count = users.len();
                    warp::reply::with_status(
                        warp::reply::json(&SearchResponse {
                            users,
                            count,
                            query,
                        }),
                        StatusCode::OK,
                    )
                }
                None => warp::reply::with_status(
                    warp::reply::json(&StatusResponse::error("Query parameter 'q' is required")),
                    StatusCode::BAD_REQUEST,
                ),
            };
            Ok::<_, warp::Rejection>(reply)
        });

    // 3. POST /api/update { user_id, rating }
    let update = warp::post()
        .and(warp::path!("api" / "update"))
        .and(warp::body::json())
        .and(with_board(board.clone()))
        .and_then(|req: UpdateRequest, board: Arc<Leaderboard>| async move {
            // Rating bounds live here, not in the engine.
            if req.rating < RATING_MIN || req.rating > RATING_MAX {
                let reply = warp::reply::json(&StatusResponse::error(
                    "Rating must be between 100 and 5000",
                ));
                return Ok::<_, warp::Rejection>(warp::reply::with_status(
                    reply,
                    StatusCode::BAD_REQUEST,
                ));
            }

            let reply = match board.update_rating(req.user_id, req.rating) {
                Ok(()) => warp::reply::with_status(
                    warp::reply::json(&StatusResponse::success(
                        "User rating updated successfully",
                    )),
                    StatusCode::OK,
                ),
                Err(e) => warp::reply::with_status(
                    warp::reply::json(&StatusResponse::error(&e.to_string())),
                    StatusCode::NOT_FOUND,
                ),
            };
            Ok::<_, warp::Rejection>(reply)
        });

    // 4. GET /health
    let health = warp::get()
        .and(warp::path("health"))
        .and(with_board(board.clone()))
        .and_then(|board: Arc<Leaderboard>| async move {
            let timestamp = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            let reply = warp::reply::json(&HealthResponse {
                status: "healthy".to_string(),
                users: board.count(),
                timestamp,
            });
            Ok::<_, warp::Rejection>(warp::reply::with_status(reply, StatusCode::OK))
        });

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_headers(vec!["content-type", "authorization"]);

    let routes = leaderboard.or(search).or(update).or(health).with(cors);

    warp::serve(routes).run(([0, 0, 0, 0], port)).await;
}

fn with_board(
    board: Arc<Leaderboard>,
) -> impl Filter<Extract = (Arc<Leaderboard>,), Error = Infallible> + Clone {
    warp::any().map(move || board.clone())
}
