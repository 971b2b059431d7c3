//! Handler actions: turn a matched request into the work to perform.
//!
//! Slot values arrive as strings and are parsed here. A missing or
//! unparsable required slot is reported as an invalid-slot service failure
//! so it is spoken back through the normal failure path.

use crate::envelope::RequestEnvelope;
use crate::error::{ServiceFailure, SkillError};
use crate::response::ResponseBuilder;
use crate::services::DefaultValue;

use super::calls::{DefaultsCall, ServiceCall, ThermostatCall, WaterCall};
use super::HandlerAction;

pub const TEMP_SLOT: &str = "temp";
pub const DURATION_SLOT: &str = "duration";
pub const ON_OFF_SLOT: &str = "onoff";

pub const HELP_SPEECH: &str = "You can say 'set the temperature to 18 degrees' or ask 'the temperature'. You can also say stop or exit to quit.";
pub const HELP_REPROMPT: &str = "What would you like to do?";

type ActionResult = Result<HandlerAction, SkillError>;

fn thermostat(call: ThermostatCall) -> ActionResult {
    Ok(HandlerAction::Invoke(ServiceCall::Thermostat(call)))
}

fn water(call: WaterCall) -> ActionResult {
    Ok(HandlerAction::Invoke(ServiceCall::Water(call)))
}

fn defaults(call: DefaultsCall) -> ActionResult {
    Ok(HandlerAction::Invoke(ServiceCall::Defaults(call)))
}

fn optional_slot(envelope: &RequestEnvelope, name: &str) -> Option<String> {
    envelope
        .slot_value(name)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn required_slot(envelope: &RequestEnvelope, name: &str, what: &str) -> Result<String, SkillError> {
    optional_slot(envelope, name).ok_or_else(|| {
        ServiceFailure::invalid_slot(format!("Sorry, I didn't catch the {}.", what)).into()
    })
}

/// Parse a spoken temperature such as "21" or "19.5".
pub fn parse_temperature(raw: Option<&str>) -> Result<f64, SkillError> {
    raw.map(str::trim)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            let message = match raw {
                Some(value) => format!("Sorry, {} is not a temperature I understand.", value),
                None => "Sorry, I didn't catch the temperature.".to_string(),
            };
            ServiceFailure::invalid_slot(message).into()
        })
}

/// Only the exact slot value "on" switches something on.
fn is_on(value: Option<&str>) -> bool {
    value == Some("on")
}

pub fn launch(_: &RequestEnvelope) -> ActionResult {
    thermostat(ThermostatCall::Launch)
}

pub fn status(_: &RequestEnvelope) -> ActionResult {
    thermostat(ThermostatCall::Status)
}

pub fn turn_up(_: &RequestEnvelope) -> ActionResult {
    thermostat(ThermostatCall::TurnUp)
}

pub fn turn_down(_: &RequestEnvelope) -> ActionResult {
    thermostat(ThermostatCall::TurnDown)
}

pub fn set_temperature(envelope: &RequestEnvelope) -> ActionResult {
    let target = parse_temperature(envelope.slot_value(TEMP_SLOT))?;
    let duration = optional_slot(envelope, DURATION_SLOT);
    thermostat(ThermostatCall::SetTemperature { target, duration })
}

/// Heating on/off. Also the entry point for deferred callbacks ending a boost.
pub fn turn(envelope: &RequestEnvelope) -> ActionResult {
    if is_on(envelope.slot_value(ON_OFF_SLOT)) {
        let duration = optional_slot(envelope, DURATION_SLOT);
        thermostat(ThermostatCall::TurnOn { duration })
    } else {
        thermostat(ThermostatCall::TurnOff)
    }
}

/// Hot water on/off; "on" when the slot is missing or blank.
pub fn turn_water(envelope: &RequestEnvelope) -> ActionResult {
    let on_off = optional_slot(envelope, ON_OFF_SLOT).unwrap_or_else(|| "on".to_string());
    if is_on(Some(on_off.as_str())) {
        let duration = optional_slot(envelope, DURATION_SLOT);
        water(WaterCall::TurnOn { duration })
    } else {
        water(WaterCall::TurnOff)
    }
}

pub fn set_default_temperature(envelope: &RequestEnvelope) -> ActionResult {
    let key = required_slot(envelope, ON_OFF_SLOT, "setting to change")?;
    let temperature = parse_temperature(envelope.slot_value(TEMP_SLOT))?;
    defaults(DefaultsCall::Set {
        key,
        value: DefaultValue::Temperature(temperature),
    })
}

pub fn set_default_duration(envelope: &RequestEnvelope) -> ActionResult {
    let duration = required_slot(envelope, DURATION_SLOT, "duration")?;
    defaults(DefaultsCall::Set {
        key: DURATION_SLOT.to_string(),
        value: DefaultValue::Duration(duration),
    })
}

pub fn list_defaults(_: &RequestEnvelope) -> ActionResult {
    defaults(DefaultsCall::List)
}

pub fn help(_: &RequestEnvelope) -> ActionResult {
    Ok(HandlerAction::Respond(
        ResponseBuilder::new()
            .speak(HELP_SPEECH)
            .reprompt(HELP_REPROMPT)
            .with_simple_card(HELP_REPROMPT, HELP_SPEECH)
            .get_response(),
    ))
}

pub fn cancel_or_stop(_: &RequestEnvelope) -> ActionResult {
    thermostat(ThermostatCall::TurnOff)
}
