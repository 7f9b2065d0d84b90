use crate::commands::error::{CommandResult, RuntimeError};
use crate::commands::{
    argument::ArgumentType, context::ExecutionContext, node::CommandNode, registry::CommandRegistry,
    CommandSender,
};
use crate::permissions::WarpAction;
use crate::player::PlayerPos;
use crate::registry::WarpError;
use crate::server::WarpServer;
use itertools::Itertools;
use tracing::info;
use warps_text::{ColorCode, TextColor, TextComponent, TextComponentBuilder};

const HELP_LINES: &[&str] = &[
    "/warp <name>      - teleport to a warp",
    "/setwarp <name>   - create or overwrite a warp at your position",
    "/delwarp <name>   - delete a warp",
    "/warps            - list the warps you can see",
    "/warpinfo <name>  - show where a warp points",
    "/renamewarp <old> <new> - rename a warp",
    "/warp help        - show this help",
];

const NO_PERMISSION_GREY: u32 = 0x7f7f7f;
const WARP_NAME_GREEN: u32 = 0x00ff00;

pub(super) fn register_commands(registry: &mut CommandRegistry) {
    registry.register(
        CommandNode::literal("warp")
            .require_permission(WarpAction::Basic)
            .executes(exec_help)
            .then(CommandNode::literal("help").executes(exec_help))
            .then(
                CommandNode::argument("name", ArgumentType::warp_name())
                    .require_permission(WarpAction::WarpTo)
                    .suggests(visible_warps)
                    .executes(exec_warp),
            ),
    );

    registry.register(
        CommandNode::literal("setwarp")
            .require_permission(WarpAction::Set)
            .then(
                CommandNode::argument("name", ArgumentType::warp_name())
                    .suggests(visible_warps)
                    .executes(exec_setwarp),
            ),
    );

    registry.register(
        CommandNode::literal("delwarp")
            .require_permission(WarpAction::Delete)
            .then(
                CommandNode::argument("name", ArgumentType::warp_name())
                    .suggests(visible_warps)
                    .executes(|ctx| {
                        let name = ctx.args().get_warp_name("name")?;
                        if ctx.store().del_warp(&name) {
                            info!("Warp '{}' deleted", name);
                            ctx.feedback(&format!("Warp deleted: {}", name))
                        } else {
                            Err(WarpError::NotFound { name }.into())
                        }
                    }),
            ),
    );

    registry.register(
        CommandNode::literal("warps")
            .require_permission(WarpAction::Basic)
            .executes(exec_list),
    );

    registry.register(
        CommandNode::literal("warpinfo")
            .require_permission(WarpAction::Info)
            .then(
                CommandNode::argument("name", ArgumentType::warp_name())
                    .suggests(visible_warps)
                    .executes(exec_info),
            ),
    );

    registry.register(
        CommandNode::literal("renamewarp")
            .require_permission(WarpAction::Rename)
            .then(
                CommandNode::argument("old", ArgumentType::warp_name())
                    .suggests(visible_warps)
                    .then(
                        CommandNode::argument("new", ArgumentType::warp_name())
                            .executes(exec_rename),
                    ),
            ),
    );

    registry.register(
        CommandNode::literal("betterwarps")
            .require_permission(WarpAction::Basic)
            .executes(|ctx| ctx.feedback("Usage: /warp help")),
    );
}

/// Names of the warps `sender` may see, sorted.
fn visible_warps(server: &WarpServer, sender: CommandSender) -> Vec<String> {
    server
        .store
        .list_warps()
        .into_keys()
        .filter(|name| server.is_allowed(sender, WarpAction::See, Some(name.as_str())))
        .sorted()
        .collect()
}

fn exec_help(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    ctx.feedback("Commands:")?;
    for line in HELP_LINES {
        ctx.reply(line)?;
    }
    Ok(())
}

fn exec_warp(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let name = ctx.args().get_warp_name("name")?;
    ctx.player_index()?;
    ctx.require_permission(WarpAction::TeleportTo, Some(name.as_str()))?;

    let point = ctx.store().get_warp(&name)?;
    if !ctx.server.dimensions.contains(point.dimension()) {
        return Err(RuntimeError::UnknownDimension {
            dimension: point.dimension().to_string(),
        }
        .into());
    }

    let player = ctx.player_mut()?;
    player.teleport(&point);
    let username = player.username.clone();
    info!("{} warped to '{}'", username, name);

    ctx.feedback(&format!(
        "Teleported to '{}' in {}.",
        name,
        point.dimension()
    ))
}

fn exec_setwarp(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let name = ctx.args().get_warp_name("name")?;
    let point = ctx.player()?.warp_point();
    let username = ctx.player()?.username.clone();

    ctx.store().set_warp(&name, point.clone());
    info!("{} set warp '{}' in {}", username, name, point.dimension());

    let pos = PlayerPos::new(point.x(), point.y(), point.z());
    ctx.feedback(&format!(
        "Warp '{}' saved at {} {}.",
        name,
        point.dimension(),
        pos
    ))
}

fn exec_list(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let names = visible_warps(ctx.server, ctx.sender());
    if names.is_empty() {
        return ctx.feedback("No visible warps.");
    }

    let entries = names
        .iter()
        .map(|name| {
            let command = format!("/warp {}", name);
            if ctx.has_permission(WarpAction::TeleportTo, Some(name.as_str())) {
                TextComponentBuilder::new(name.as_str())
                    .underlined(true)
                    .run_command(command.clone())
                    .hover_text(format!("Click to {}", command))
                    .finish()
            } else {
                TextComponentBuilder::new(name.as_str())
                    .italic(true)
                    .color(TextColor::rgb(NO_PERMISSION_GREY))
                    .hover_text(format!("You don't have permission to {}", command))
                    .finish()
            }
        })
        .collect_vec();

    let header = TextComponentBuilder::new(format!(
        "{} Warps ({}): ",
        ctx.server.config.message_prefix,
        names.len()
    ))
    .color_code(ColorCode::Gold)
    .finish();

    ctx.reply_components(&[header, TextComponent::join(entries, ", ")])
}

fn exec_info(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let name = ctx.args().get_warp_name("name")?;
    ctx.require_permission(WarpAction::See, Some(name.as_str()))?;
    let point = ctx.store().get_warp(&name)?;

    let message = [
        TextComponent::from(format!("{} Warp ", ctx.server.config.message_prefix)),
        TextComponentBuilder::new(name.as_str())
            .color(TextColor::rgb(WARP_NAME_GREEN))
            .finish(),
        TextComponent::from(format!(
            ": Dimension: {}, Position: ({:.1}, {:.1}, {:.1}), Yaw: {:.1}, Pitch: {:.1}",
            point.dimension(),
            point.x(),
            point.y(),
            point.z(),
            point.yaw(),
            point.pitch()
        )),
    ];
    ctx.reply_components(&message)
}

fn exec_rename(ctx: &mut ExecutionContext<'_>) -> CommandResult<()> {
    let old_name = ctx.args().get_warp_name("old")?;
    let new_name = ctx.args().get_warp_name("new")?;

    ctx.store().rename_warp(&old_name, &new_name)?;
    info!("Warp '{}' renamed to '{}'", old_name, new_name);

    ctx.feedback(&format!("Warp '{}' renamed to '{}'.", old_name, new_name))?;
    ctx.feedback(&format!(
        "Note: Permissions are not automatically updated. Change them manually from '{}' to '{}'.",
        old_name, new_name
    ))
}
