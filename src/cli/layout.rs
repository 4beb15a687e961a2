//! tbx layout commands

use crate::app::App;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

use super::LayoutCommands;

pub fn run(app: &mut App, command: LayoutCommands, options: OutputOptions) -> Result<()> {
    match command {
        LayoutCommands::Show => {
            let order = app.layout().to_vec();
            let mut human = HumanOutput::new("tbx layout show");
            for (index, panel) in order.iter().enumerate() {
                human.push_detail(format!("{}. {panel}", index + 1));
            }
            emit_success(options, "layout show", &order, Some(&human))
        }

        LayoutCommands::Set { panels } => {
            app.set_layout(panels)?;
            let order = app.layout().to_vec();
            let mut human = HumanOutput::new("tbx layout set: order saved");
            human.push_summary("order", order.join(", "));
            emit_success(options, "layout set", &order, Some(&human))
        }

        LayoutCommands::Reset => {
            app.reset_layout()?;
            let order = app.layout().to_vec();
            let mut human = HumanOutput::new("tbx layout reset: default order restored");
            human.push_summary("order", order.join(", "));
            emit_success(options, "layout reset", &order, Some(&human))
        }
    }
}
