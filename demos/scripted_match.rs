use quoridor_arena::*;

fn main() {
    tracing_subscriber::fmt().with_env_filter("quoridor_arena=debug").init();

    println!("Scripted Quoridor Match Demo\n");

    // "e5" is two squares away from e7: rejected, and player 0 plays again
    let moves = [
        "e8", "e2", "e7", "e3", "e5", "e6", "e4", "e5", "d4", "e4", "d3", "e3", "d2", "e2", "c2",
        "e1",
    ];

    let mut session = Session::default();
    println!("{}", session.state().display_board());

    for square in moves {
        let player = session.current_player();
        match session.submit(square) {
            Ok(GameStatus::InProgress) => println!("Player {} -> {}", player, square),
            Ok(GameStatus::GameOver { winner }) => {
                println!("Player {} -> {}", player, square);
                println!("\n{}", session.state().display_board());
                println!("🎉 Player {} wins after {} moves!", winner, session.move_count());
                return;
            }
            Err(e) => println!("❌ Player {} -> {}: {}", player, square, e),
        }
    }

    println!("\n{}", session.state().display_board());
    println!("No winner after {} moves", session.move_count());
}
