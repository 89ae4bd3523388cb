//! Authored content for the built-in scripts.
//!
//! Instruction text is kept verbatim from the published dialogues; `{belief}`
//! marks where the user's limiting belief is substituted at render time.

use super::{Script, ScriptKind, StepDescriptor};

fn step(title: &str, instruction: &str, requires_input: bool) -> StepDescriptor {
    StepDescriptor {
        title: title.to_string(),
        instruction: instruction.to_string(),
        requires_input,
    }
}

fn protocol(id: &str, name: &str, steps: Vec<StepDescriptor>) -> Script {
    Script {
        id: id.to_string(),
        name: name.to_string(),
        kind: ScriptKind::Protocol,
        description: None,
        premium: false,
        steps,
    }
}

/// Power exercises are a plain sequence of prompts; none require input, the
/// user advances when ready. Reflection notes on the final step are optional.
fn exercise(id: &str, name: &str, description: &str, prompts: &[&str]) -> Script {
    Script {
        id: id.to_string(),
        name: name.to_string(),
        kind: ScriptKind::Exercise,
        description: Some(description.to_string()),
        premium: false,
        steps: prompts
            .iter()
            .enumerate()
            .map(|(i, prompt)| step(&format!("Step {}", i + 1), prompt, false))
            .collect(),
    }
}

fn premium_area(id: &str, name: &str, description: &str) -> Script {
    Script {
        id: id.to_string(),
        name: name.to_string(),
        kind: ScriptKind::Exercise,
        description: Some(description.to_string()),
        premium: true,
        steps: Vec::new(),
    }
}

pub(crate) fn builtin_scripts() -> Vec<Script> {
    vec![
        protocol(
            "submodality",
            "Submodality Belief Change",
            vec![
                step(
                    "Identify Your Limiting Belief",
                    "Your current limiting belief is: \"{belief}\". Take a moment to notice how \
                     you represent this belief in your mind. Where do you see it? Is it an image, \
                     words, or a feeling?",
                    true,
                ),
                step(
                    "Find a Belief You Don't Hold",
                    "Think of a statement that you know is NOT true for you. For example, \"The \
                     sky is green\" or \"I am a penguin.\" Notice how you represent this doubtful \
                     belief in your mind.",
                    true,
                ),
                step(
                    "Create Your New Empowering Belief",
                    "What would be a more empowering belief to replace \"{belief}\"? Write down a \
                     positive alternative that feels slightly challenging but possible.",
                    true,
                ),
                step(
                    "Change the Submodalities",
                    "Visualize your limiting belief and notice its characteristics (location, \
                     size, brightness, etc.). Now, change these characteristics to match how you \
                     represent beliefs you don't hold. Make it smaller, dimmer, or move it away.",
                    false,
                ),
                step(
                    "Install the New Belief",
                    "Take your new empowering belief and give it the submodalities of something \
                     you know to be true. Make it bright, close, and compelling. Take a deep \
                     breath and allow this new belief to integrate.",
                    false,
                ),
                step(
                    "Test the Change",
                    "Think about the original limiting belief. Notice if it feels different now. \
                     On a scale of 1-10, how strongly do you hold the new belief instead?",
                    true,
                ),
            ],
        ),
        protocol(
            "timeline",
            "Timeline Reimprinting",
            vec![
                step(
                    "Access Your Timeline",
                    "Imagine your timeline stretching out before and behind you. The past is \
                     behind you, the future is in front. Take a moment to sense this line of time.",
                    false,
                ),
                step(
                    "Identify Origin of Belief",
                    "When did you first start believing \"{belief}\"? Float above your timeline \
                     and drift back to find the earliest memory where this belief was formed.",
                    true,
                ),
                step(
                    "Gather Resources",
                    "What resources, wisdom, or strengths do you have now that you didn't have \
                     then? List at least three resources that would have changed how you \
                     interpreted that event.",
                    true,
                ),
                step(
                    "Reimprint the Memory",
                    "Float down into that memory with your new resources. Experience it \
                     differently with your adult wisdom. Notice how the interpretation changes.",
                    false,
                ),
                step(
                    "Create a New Belief",
                    "With this new perspective, what belief would you have formed instead? Write \
                     down this new empowering belief.",
                    true,
                ),
                step(
                    "Bring the Resources Forward",
                    "Return to the present, bringing these resources and new belief with you. \
                     Notice how events along your timeline shift and change as this new belief \
                     ripples forward to the present.",
                    false,
                ),
            ],
        ),
        protocol(
            "walking",
            "The Walking Belief Change Pattern",
            vec![
                step(
                    "Set Up Your Space",
                    "Find a space where you can walk in a straight line for about 6-10 steps. \
                     This will be your belief change line.",
                    false,
                ),
                step(
                    "Identify Current State",
                    "Stand at the beginning of your line. Fully associate into the feeling of \
                     believing \"{belief}\". Notice how it feels in your body.",
                    true,
                ),
                step(
                    "Define Desired State",
                    "What would you prefer to believe instead? Create a positive statement that \
                     directly counters your limiting belief.",
                    true,
                ),
                step(
                    "Walk the Line",
                    "Begin walking slowly along your line. With each step, feel the limiting \
                     belief weakening and the new belief strengthening. Allow your physiology to \
                     change as you move.",
                    false,
                ),
                step(
                    "Fully Embody the New Belief",
                    "At the end of your line, fully step into the new belief. Stand tall, breathe \
                     deeply, and embody the feeling of completely believing your new empowering \
                     belief.",
                    false,
                ),
                step(
                    "Anchor the New State",
                    "Create a physical anchor for this new belief - perhaps a gesture or touch on \
                     your wrist. Use this anchor while stating your new belief out loud three \
                     times.",
                    true,
                ),
            ],
        ),
        exercise(
            "self-awareness",
            "Self-Awareness Practice",
            "This exercise helps you develop deeper self-awareness by identifying your core \
             patterns, strengths, and areas for growth.",
            &[
                "Find a quiet space where you won't be disturbed for 15-20 minutes.",
                "Take several deep breaths to center yourself.",
                "Reflect on a recent challenging situation where you felt triggered or reactive.",
                "Notice what thoughts, emotions, and physical sensations arose during this \
                 situation.",
                "Identify any patterns or themes that connect to similar past experiences.",
                "Consider what this pattern reveals about your core beliefs and values.",
                "Identify one strength you demonstrated in this situation.",
                "Identify one area where you could grow or respond differently next time.",
            ],
        ),
        exercise(
            "vision",
            "Vision & Purpose Development",
            "This exercise helps you clarify your personal vision and connect with your deeper \
             sense of purpose.",
            &[
                "Find a comfortable space where you can think creatively for 20-30 minutes.",
                "Imagine it's 5 years in the future and you're living your ideal life.",
                "Visualize specific details: Where are you? What are you doing? Who is with you?",
                "Notice what feels most energizing and meaningful in this vision.",
                "Write down 3-5 key elements that are essential to your ideal future.",
                "For each element, identify why it matters to you at a deep level.",
                "Consider what these elements reveal about your core values and purpose.",
                "Create a short purpose statement that captures the essence of how you want to \
                 contribute and what matters most to you.",
            ],
        ),
        exercise(
            "communication",
            "Communication & Influence Skills",
            "This exercise helps you develop more powerful communication skills and increase \
             your influence with others.",
            &[
                "Identify an upcoming conversation where you want to be influential.",
                "Clarify your specific outcome: What do you want the other person to understand, \
                 feel, or do?",
                "Consider the other person's perspective, needs, and values.",
                "Prepare 2-3 key points that will resonate with their perspective.",
                "Practice delivering these points with confidence (use a mirror or record \
                 yourself).",
                "Pay attention to your body language, tone, and pacing.",
                "Prepare for potential objections or resistance with respectful responses.",
                "After the conversation, reflect on what worked well and what you could improve \
                 next time.",
            ],
        ),
        premium_area(
            "resilience",
            "Resilience & Adaptability",
            "Build your capacity to bounce back from setbacks",
        ),
        premium_area(
            "strategic",
            "Strategic Thinking",
            "Develop advanced planning and decision-making skills",
        ),
        premium_area(
            "presence",
            "Personal Presence",
            "Cultivate charisma and command attention in any room",
        ),
    ]
}
