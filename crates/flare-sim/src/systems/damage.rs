//! Damage system: derives ship status flags from the state of their loadout.

use hecs::World;

use flare_core::components::{BodyTag, DamageStatus, Loadout};
use flare_core::enums::ComponentKind;
use flare_core::events::PilotEvent;

/// Recompute disarmed / stranded / uncontrollable / alive for every ship.
///
/// A ship without any internal module fitted cannot be destroyed this way.
/// Destruction is permanent.
pub fn refresh(world: &mut World, events: &mut Vec<PilotEvent>) {
    for (_entity, (tag, loadout, status)) in
        world.query_mut::<(&BodyTag, &Loadout, &mut DamageStatus)>()
    {
        let live = |kind: ComponentKind| {
            loadout
                .components
                .iter()
                .any(|c| c.kind == kind && !c.broken)
        };
        let has_internals = loadout
            .components
            .iter()
            .any(|c| c.kind == ComponentKind::Internal);

        status.disarmed = !live(ComponentKind::Weapon);
        status.stranded = !live(ComponentKind::EnginePod);
        status.uncontrollable = !live(ComponentKind::Rcs);

        if status.alive && has_internals && !live(ComponentKind::Internal) {
            status.alive = false;
            tracing::info!(ship = %tag.id, "ship destroyed");
            events.push(PilotEvent::ShipDestroyed { ship: tag.id });
        }
    }
}
