use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed snapshot command to its handler.
pub fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Summary => commands::summary::handle(ctx, flags),
        Commands::List(args) => commands::list::handle(&args, ctx, flags),
        Commands::Get(args) => commands::get::handle(&args.id, ctx, flags),
        Commands::Nav(args) => commands::nav::handle(&args.id, ctx, flags),
        Commands::Triggers(args) => commands::triggers::handle(&args, ctx, flags),
        Commands::Categories => commands::categories::handle(ctx, flags),
        Commands::Markets | Commands::Validate(_) | Commands::Schema(_) => {
            unreachable!("markets/validate/schema are pre-dispatched in main")
        }
    }
}
