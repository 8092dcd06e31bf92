// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use std::io;

error_chain! {
    foreign_links {
        Io(io::Error);
        Decode(serde_json::Error);
    }

    errors {
        #[doc = "The module file could not be opened."]
        Load(path: String, detail: String) {
            description("Failed to open extension module"),
            display("Failed to open extension module {}: {}", path, detail),
        }

        #[doc = "The module's registration descriptor is missing or malformed."]
        Descriptor(path: String, detail: String) {
            description("Invalid registration descriptor"),
            display("Invalid registration descriptor in {}: {}", path, detail),
        }

        #[doc = "A declared handler symbol failed to resolve."]
        HandlerResolution(module: String, symbol: String, detail: String) {
            description("Failed to resolve handler symbol"),
            display(
                "Failed to resolve handler {} declared by module {}: {}",
                symbol, module, detail
            ),
        }

        #[doc = "A descriptor subscribed to an event the engine never fires."]
        UnknownEvent(module: String, event: String) {
            description("Unknown event name"),
            display("Module {} subscribes to unknown event {}", module, event),
        }

        DuplicateModule(name: String) {
            description("Module name already registered"),
            display("Module name {} already registered", name),
        }
    }
}
