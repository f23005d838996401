use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::workspace::Workspace;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config, mut ws: Workspace) -> AppResult<()> {
    if let Commands::List {
        screen,
        filters,
        page,
    } = cmd
    {
        ws.set_active(*screen);
        let view = ws.current_mut();
        for (field, value) in filters {
            view.set_filter(field, value)?;
        }
        view.set_page(*page);

        print!("{}", view.render_list(screen.title(), cfg));
    }
    Ok(())
}
